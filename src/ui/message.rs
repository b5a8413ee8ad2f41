use crate::{
    media::SelectedFile,
    studio::state::{ImageSlot, RoomDimensions},
};

#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    // User Input
    Quit,
    FocusNext,
    FocusPrev,

    // Inputs
    SelectFile(ImageSlot, SelectedFile),
    ClearImage(ImageSlot),
    SetDimensions(RoomDimensions),
    AutoMeasure,
    SetInstruction(String),

    // Generation
    Generate,
    Cancel,
    DismissError,
    Reset,
    Save,
}
