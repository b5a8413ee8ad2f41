use std::path::PathBuf;

use crate::{
    media::{ImageHandle, Thumbnail},
    studio::{
        controller::RunId,
        error::GenerationFailed,
        session::LoadId,
        state::{ImageSlot, ProcessingStep, RoomDimensions},
    },
};

/// Completions reported back to the event loop by background tasks.
#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum Event {
    ImageLoaded {
        slot: ImageSlot,
        load: LoadId,
        name: String,
        image: ImageHandle,
        thumbnail: Option<Thumbnail>,
    },
    ImageLoadFailed {
        slot: ImageSlot,
        load: LoadId,
    },
    /// `room` is the load of the room photo that was measured.
    DimensionsEstimated {
        room: LoadId,
        dimensions: RoomDimensions,
    },
    CompositeFinished {
        run: RunId,
        outcome: Result<ImageHandle, GenerationFailed>,
        thumbnail: Option<Thumbnail>,
    },
    AnimationProgress {
        run: RunId,
        steps: Vec<ProcessingStep>,
    },
    AnimationComplete {
        run: RunId,
    },
    ResultSaved(PathBuf),
    SaveFailed(String),
}
