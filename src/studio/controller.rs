use tracing::{debug, info, warn};

use crate::{
    media::ImageHandle,
    studio::{
        error::GenerationFailed,
        state::{AppState, ImageSlot, RoomDimensions},
    },
};

/// Identifies one press of "Generate". Results tagged with an older run are stale.
pub type RunId = u64;

pub const GENERATION_ERROR: &str =
    "Failed to generate image. Please try again or check your API key.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub run: RunId,
    pub room: ImageHandle,
    pub furniture: ImageHandle,
    pub instruction: String,
    pub dimensions: Option<RoomDimensions>,
}

/// All cross-cutting state of a session and the rules for changing it.
///
/// Nothing here is async. The owner feeds in user actions and completion
/// events; `Complete` is reached only once both the composite result and the
/// animation signal for the current run have been recorded, in either order.
#[derive(Debug, Default)]
pub struct Controller {
    state: AppState,
    room: Option<ImageHandle>,
    furniture: Option<ImageHandle>,
    dimensions: RoomDimensions,
    instruction: String,
    is_measuring: bool,
    result: Option<ImageHandle>,
    error: Option<String>,
    animation_complete: bool,
    run: RunId,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&ImageHandle> {
        match slot {
            ImageSlot::Room => self.room.as_ref(),
            ImageSlot::Furniture => self.furniture.as_ref(),
        }
    }

    pub fn dimensions(&self) -> &RoomDimensions {
        &self.dimensions
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn is_measuring(&self) -> bool {
        self.is_measuring
    }

    pub fn result(&self) -> Option<&ImageHandle> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_run(&self) -> RunId {
        self.run
    }

    pub fn is_animation_complete(&self) -> bool {
        self.animation_complete
    }

    /// Inputs only change while the input screens are shown.
    pub fn set_image(&mut self, slot: ImageSlot, image: Option<ImageHandle>) -> bool {
        if !self.state.shows_inputs() {
            warn!("Ignoring {:?} image change while {:?}", slot, self.state);
            return false;
        }

        match slot {
            ImageSlot::Room => self.room = image,
            ImageSlot::Furniture => self.furniture = image,
        }
        true
    }

    pub fn set_dimensions(&mut self, dimensions: RoomDimensions) -> bool {
        if self.is_measuring {
            return false;
        }
        self.dimensions = dimensions;
        true
    }

    pub fn set_instruction(&mut self, instruction: String) {
        self.instruction = instruction;
    }

    pub fn can_generate(&self) -> bool {
        self.state.shows_inputs() && self.room.is_some() && self.furniture.is_some()
    }

    /// `Idle | Error -> Processing`. Returns the work to start, or `None`
    /// when generating isn't possible right now.
    pub fn generate(&mut self) -> Option<GenerationRequest> {
        if !self.can_generate() {
            return None;
        }
        let room = self.room.clone()?;
        let furniture = self.furniture.clone()?;

        self.run += 1;
        self.state = AppState::Processing;
        self.animation_complete = false;
        self.error = None;
        self.result = None;

        info!("Generation run {} started", self.run);

        Some(GenerationRequest {
            run: self.run,
            room,
            furniture,
            instruction: self.instruction.clone(),
            dimensions: self
                .dimensions
                .is_usable()
                .then(|| self.dimensions.clone()),
        })
    }

    fn accepts(&self, run: RunId) -> bool {
        self.state == AppState::Processing && run == self.run
    }

    /// Records the composite call's outcome. Failure moves straight to
    /// `Error`; success waits for the animation.
    pub fn composite_finished(
        &mut self,
        run: RunId,
        outcome: Result<ImageHandle, GenerationFailed>,
    ) -> bool {
        if !self.accepts(run) {
            debug!("Discarding stale composite result for run {}", run);
            return false;
        }

        match outcome {
            Ok(image) => {
                self.result = Some(image);
                self.try_complete();
            }
            Err(GenerationFailed) => {
                self.error = Some(GENERATION_ERROR.to_string());
                self.state = AppState::Error;
            }
        }
        true
    }

    pub fn animation_finished(&mut self, run: RunId) -> bool {
        if !self.accepts(run) {
            debug!("Discarding stale animation signal for run {}", run);
            return false;
        }

        self.animation_complete = true;
        self.try_complete();
        true
    }

    fn try_complete(&mut self) {
        if self.state == AppState::Processing && self.result.is_some() && self.animation_complete
        {
            info!("Generation run {} complete", self.run);
            self.state = AppState::Complete;
        }
    }

    /// `Complete | Error -> Idle`. Selections are kept.
    pub fn reset(&mut self) -> bool {
        if !matches!(self.state, AppState::Complete | AppState::Error) {
            return false;
        }

        self.state = AppState::Idle;
        self.result = None;
        self.error = None;
        self.animation_complete = false;
        true
    }

    /// `Processing -> Idle`. The in-flight call keeps running; whatever it
    /// returns is dropped by the run check.
    pub fn cancel(&mut self) -> bool {
        if self.state != AppState::Processing {
            return false;
        }

        info!("Generation run {} cancelled", self.run);
        self.state = AppState::Idle;
        self.result = None;
        self.animation_complete = false;
        true
    }

    pub fn dismiss_error(&mut self) -> bool {
        if self.error.take().is_none() {
            return false;
        }
        if self.state == AppState::Error {
            self.state = AppState::Idle;
        }
        true
    }

    /// Starts auto-measure if there is a room photo and no measurement running.
    pub fn begin_measure(&mut self) -> Option<ImageHandle> {
        if self.is_measuring || !self.state.shows_inputs() {
            return None;
        }
        let room = self.room.clone()?;
        self.is_measuring = true;
        Some(room)
    }

    pub fn finish_measure(&mut self, dimensions: RoomDimensions) {
        self.is_measuring = false;
        self.dimensions = dimensions;
    }

    /// Ends a measurement whose photo is gone; the form keeps its values.
    pub fn abandon_measure(&mut self) {
        self.is_measuring = false;
    }
}
