use async_trait::async_trait;

use crate::{
    media::ImageHandle,
    studio::{error::GenerationFailed, state::RoomDimensions},
};

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Best effort. Never fails: any problem yields `RoomDimensions::fallback()`.
    async fn estimate_dimensions(&self, room: &ImageHandle) -> RoomDimensions;

    /// Places `furniture` into `room`. Parts go out in that order, prompt last.
    async fn generate_composite(
        &self,
        room: &ImageHandle,
        furniture: &ImageHandle,
        instruction: &str,
        dimensions: Option<&RoomDimensions>,
    ) -> Result<ImageHandle, GenerationFailed>;
}
