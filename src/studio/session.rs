use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use flume::Sender;
use tracing::{debug, error, info, warn};

use crate::{
    config::{AnimationTiming, Config},
    event::events::Event,
    media::{ImageHandle, SelectedFile, Thumbnail, encode_file_as_image, is_image},
    studio::{
        animation::{self, ProcessingAnimation},
        controller::{Controller, GenerationRequest},
        state::{AppState, ImageSlot, ProcessingStep, RoomDimensions},
        traits::GenerationService,
    },
    util::task::{TaskKey, TaskManager},
};

/// Counts selections and clears per slot. A load that finishes under an
/// older id lost the race and is dropped.
pub type LoadId = u64;

#[derive(Debug, Clone)]
pub struct Preview {
    pub name: String,
    pub thumbnail: Option<Thumbnail>,
}

/// Owns the controller and performs the side effects its transitions imply.
/// Lives on the event loop; background work reports back through `event_tx`.
pub struct Session {
    controller: Controller,
    tasks: TaskManager,
    service: Arc<dyn GenerationService>,
    event_tx: Sender<Event>,
    timing: AnimationTiming,
    download_path: PathBuf,
    previews: HashMap<ImageSlot, Preview>,
    loads: HashMap<ImageSlot, LoadId>,
    result_preview: Option<Thumbnail>,
    steps: Vec<ProcessingStep>,
    notice: Option<String>,
}

impl Session {
    pub fn new(service: Arc<dyn GenerationService>, event_tx: Sender<Event>, config: &Config) -> Self {
        Self {
            controller: Controller::new(),
            tasks: TaskManager::new(),
            service,
            event_tx,
            timing: config.animation,
            download_path: config.download_path(),
            previews: HashMap::new(),
            loads: HashMap::new(),
            result_preview: None,
            steps: ProcessingAnimation::new().steps().to_vec(),
            notice: None,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn state(&self) -> AppState {
        self.controller.state()
    }

    pub fn preview(&self, slot: ImageSlot) -> Option<&Preview> {
        self.controller
            .image(slot)
            .and_then(|_| self.previews.get(&slot))
    }

    pub fn result_preview(&self) -> Option<&Thumbnail> {
        self.result_preview.as_ref()
    }

    pub fn steps(&self) -> &[ProcessingStep] {
        &self.steps
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn download_path(&self) -> &Path {
        &self.download_path
    }

    pub fn current_load(&self, slot: ImageSlot) -> LoadId {
        self.loads.get(&slot).copied().unwrap_or_default()
    }

    fn next_load(&mut self, slot: ImageSlot) -> LoadId {
        let load = self.loads.entry(slot).or_default();
        *load += 1;
        *load
    }

    pub fn is_loading(&self, slot: ImageSlot) -> bool {
        self.tasks.is_running(load_key(slot))
    }

    /// Starts reading `file` into `slot`. Non-images are ignored without a word.
    pub fn select_file(&mut self, slot: ImageSlot, file: SelectedFile) -> bool {
        if !self.state().shows_inputs() {
            return false;
        }
        if !is_image(&file) {
            info!("Ignoring non-image selection {}", file.path.display());
            return false;
        }

        let load = self.next_load(slot);
        let tx = self.event_tx.clone();
        self.tasks.spawn(
            load_key(slot),
            tokio::spawn(async move {
                match encode_file_as_image(&file).await {
                    Ok(image) => {
                        let thumbnail = thumbnail_of(&image).await;
                        let _ = tx.send(Event::ImageLoaded {
                            slot,
                            load,
                            name: file.file_name(),
                            image,
                            thumbnail,
                        });
                    }
                    Err(e) => {
                        // Not surfaced to the user.
                        error!("Error reading file: {}", e);
                        let _ = tx.send(Event::ImageLoadFailed { slot, load });
                    }
                }
            }),
        );
        true
    }

    pub fn clear_image(&mut self, slot: ImageSlot) -> bool {
        self.tasks.abort(load_key(slot));
        self.next_load(slot);
        if self.controller.set_image(slot, None) {
            self.previews.remove(&slot);
            true
        } else {
            false
        }
    }

    pub fn set_dimensions(&mut self, dimensions: RoomDimensions) -> bool {
        self.controller.set_dimensions(dimensions)
    }

    pub fn set_instruction(&mut self, instruction: String) {
        self.controller.set_instruction(instruction);
    }

    pub fn auto_measure(&mut self) -> bool {
        let Some(room) = self.controller.begin_measure() else {
            return false;
        };

        let measured = self.current_load(ImageSlot::Room);
        let service = self.service.clone();
        let tx = self.event_tx.clone();
        self.tasks.spawn(
            TaskKey::Measure,
            tokio::spawn(async move {
                let dimensions = service.estimate_dimensions(&room).await;
                let _ = tx.send(Event::DimensionsEstimated {
                    room: measured,
                    dimensions,
                });
            }),
        );
        true
    }

    pub fn generate(&mut self) -> bool {
        let Some(request) = self.controller.generate() else {
            return false;
        };

        self.steps = ProcessingAnimation::new().steps().to_vec();
        self.result_preview = None;
        self.notice = None;

        self.tasks.spawn(
            TaskKey::Animation,
            animation::spawn(request.run, self.timing, self.event_tx.clone()),
        );
        // Untracked: the request is never aborted. A late reply is dropped by
        // the controller's run check.
        tokio::spawn(run_composite(
            self.service.clone(),
            request,
            self.event_tx.clone(),
        ));
        true
    }

    pub fn cancel(&mut self) -> bool {
        let changed = self.controller.cancel();
        self.sync_tasks();
        changed
    }

    pub fn reset(&mut self) -> bool {
        let changed = self.controller.reset();
        if changed {
            self.result_preview = None;
            self.notice = None;
        }
        self.sync_tasks();
        changed
    }

    pub fn dismiss_error(&mut self) -> bool {
        let changed = self.controller.dismiss_error();
        self.sync_tasks();
        changed
    }

    pub fn save_result(&mut self) -> bool {
        if self.state() != AppState::Complete {
            return false;
        }
        let Some(image) = self.controller.result().cloned() else {
            return false;
        };

        let path = self.download_path.clone();
        let tx = self.event_tx.clone();
        self.tasks.spawn(
            TaskKey::Save,
            tokio::spawn(async move {
                match save_image(&image, &path).await {
                    Ok(()) => {
                        info!("Saved result to {}", path.display());
                        let _ = tx.send(Event::ResultSaved(path));
                    }
                    Err(e) => {
                        warn!("Failed to save result: {}", e);
                        let _ = tx.send(Event::SaveFailed(e.to_string()));
                    }
                }
            }),
        );
        true
    }

    /// Folds a background completion into the session.
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::ImageLoaded {
                slot,
                load,
                name,
                image,
                thumbnail,
            } => {
                if load != self.current_load(slot) {
                    debug!("Discarding superseded {} load {}", slot.label(), load);
                } else if self.controller.set_image(slot, Some(image)) {
                    self.previews.insert(slot, Preview { name, thumbnail });
                }
            }
            Event::ImageLoadFailed { slot, load } => {
                warn!("{} image load {} failed", slot.label(), load);
            }
            Event::DimensionsEstimated { room, dimensions } => {
                if room == self.current_load(ImageSlot::Room)
                    && self.controller.image(ImageSlot::Room).is_some()
                {
                    self.controller.finish_measure(dimensions);
                } else {
                    debug!("Discarding estimate for replaced room photo");
                    self.controller.abandon_measure();
                }
            }
            Event::CompositeFinished {
                run,
                outcome,
                thumbnail,
            } => {
                if self.controller.composite_finished(run, outcome) {
                    self.result_preview = thumbnail;
                }
            }
            Event::AnimationProgress { run, steps } => {
                if self.state() == AppState::Processing && run == self.controller.current_run() {
                    self.steps = steps;
                }
            }
            Event::AnimationComplete { run } => {
                self.controller.animation_finished(run);
            }
            Event::ResultSaved(path) => {
                self.notice = Some(format!("Saved to {}", path.display()));
            }
            Event::SaveFailed(reason) => {
                self.notice = Some(format!("Could not save image: {reason}"));
            }
        }

        self.sync_tasks();
    }

    /// The animation only lives while the processing screen does.
    fn sync_tasks(&mut self) {
        if self.state() != AppState::Processing {
            self.tasks.abort(TaskKey::Animation);
        }
    }
}

fn load_key(slot: ImageSlot) -> TaskKey {
    match slot {
        ImageSlot::Room => TaskKey::LoadRoom,
        ImageSlot::Furniture => TaskKey::LoadFurniture,
    }
}

async fn run_composite(
    service: Arc<dyn GenerationService>,
    request: GenerationRequest,
    tx: Sender<Event>,
) {
    let outcome = service
        .generate_composite(
            &request.room,
            &request.furniture,
            &request.instruction,
            request.dimensions.as_ref(),
        )
        .await;

    let thumbnail = match &outcome {
        Ok(image) => thumbnail_of(image).await,
        Err(_) => None,
    };

    let _ = tx.send(Event::CompositeFinished {
        run: request.run,
        outcome,
        thumbnail,
    });
}

async fn thumbnail_of(image: &ImageHandle) -> Option<Thumbnail> {
    let image = image.clone();
    match tokio::task::spawn_blocking(move || Thumbnail::from_handle(&image)).await {
        Ok(Ok(thumbnail)) => Some(thumbnail),
        Ok(Err(e)) => {
            warn!("No preview available: {}", e);
            None
        }
        Err(e) => {
            warn!("Preview task failed: {}", e);
            None
        }
    }
}

async fn save_image(image: &ImageHandle, path: &Path) -> color_eyre::Result<()> {
    let bytes = image.decode()?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}
