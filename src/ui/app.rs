use std::sync::Arc;

use flume::{Receiver, Sender};
use ratatui::{Frame, crossterm::event::KeyEvent};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    event::events::Event,
    http::GeminiClient,
    studio::{session::Session, state::ImageSlot},
};

use super::{
    components::{
        dimensions::DimensionsForm, instruction::InstructionField, uploader::Uploader,
    },
    layout::AppLayout,
    message::AppMessage,
    state::{Focus, UiState},
    traits::Component,
    tui::Tui,
    util::handler::EventHandler,
};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub event_tx: Sender<Event>,
    pub session: Session,
    pub state: UiState,
    pub room: Uploader,
    pub furniture: Uploader,
    pub dimensions: DimensionsForm,
    pub instruction: InstructionField,
    pub model: String,
}

impl App {
    pub fn new(config: Config) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();
        if config.api_key.is_empty() {
            warn!("GEMINI_API_KEY is not set; generation requests will fail");
        }
        info!("Starting with {:?}", config);

        let client = GeminiClient::new(&config)?;
        let model = client.model().to_string();
        let session = Session::new(Arc::new(client), event_tx.clone(), &config);

        Ok(Self {
            event_rx,
            event_tx,
            session,
            state: UiState::default(),
            room: Uploader::new(ImageSlot::Room),
            furniture: Uploader::new(ImageSlot::Furniture),
            dimensions: DimensionsForm::new(),
            instruction: InstructionField::new(),
            model,
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        tui.draw(|f| self.ui(f))?;
        while !self.state.should_quit {
            if EventHandler::handle_events(self, &tui).await? {
                tui.draw(|f| self.ui(f))?;
            }
        }

        tui.exit()?;
        Ok(())
    }

    fn ui(&mut self, frame: &mut Frame) {
        let area = frame.area();
        AppLayout::new(self).render(frame, area);
    }

    /// Hands a key the global map didn't claim to the focused panel.
    pub fn route_key(&mut self, key: KeyEvent) -> Option<AppMessage> {
        let Self {
            session,
            state,
            room,
            furniture,
            dimensions,
            instruction,
            ..
        } = self;
        let component: &mut dyn Component = match state.focus {
            Focus::RoomUpload => room,
            Focus::Dimensions => dimensions,
            Focus::FurnitureUpload => furniture,
            Focus::Instruction => instruction,
        };
        component.handle_input(key, session)
    }

    /// Pastes go to the focused panel; on an uploader that is a file drop.
    pub fn route_paste(&mut self, text: &str) -> Option<AppMessage> {
        let Self {
            session,
            state,
            room,
            furniture,
            dimensions,
            instruction,
            ..
        } = self;
        let component: &mut dyn Component = match state.focus {
            Focus::RoomUpload => room,
            Focus::Dimensions => dimensions,
            Focus::FurnitureUpload => furniture,
            Focus::Instruction => instruction,
        };
        component.handle_paste(text, session)
    }

    pub fn update(&mut self, msg: AppMessage) {
        debug!("Message: {:?}", msg);
        match msg {
            AppMessage::Quit => self.state.should_quit = true,
            AppMessage::FocusNext => self.state.focus = self.state.focus.next(),
            AppMessage::FocusPrev => self.state.focus = self.state.focus.prev(),
            AppMessage::SelectFile(slot, file) => {
                self.session.select_file(slot, file);
            }
            AppMessage::ClearImage(slot) => {
                self.session.clear_image(slot);
            }
            AppMessage::SetDimensions(dimensions) => {
                self.session.set_dimensions(dimensions);
            }
            AppMessage::AutoMeasure => {
                self.session.auto_measure();
            }
            AppMessage::SetInstruction(text) => self.session.set_instruction(text),
            AppMessage::Generate => {
                if !self.session.generate() {
                    info!("Generate ignored in {:?}", self.session.state());
                }
            }
            AppMessage::Cancel => {
                self.session.cancel();
            }
            AppMessage::DismissError => {
                self.session.dismiss_error();
            }
            AppMessage::Reset => {
                self.session.reset();
            }
            AppMessage::Save => {
                self.session.save_result();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::studio::state::AppState;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn app() -> App {
        App::new(Config::default()).unwrap()
    }

    #[test]
    fn focus_and_quit_messages() {
        let mut app = app();
        assert_eq!(app.state.focus, Focus::RoomUpload);
        app.update(AppMessage::FocusNext);
        assert_eq!(app.state.focus, Focus::Dimensions);
        app.update(AppMessage::FocusPrev);
        app.update(AppMessage::FocusPrev);
        assert_eq!(app.state.focus, Focus::Instruction);

        app.update(AppMessage::Quit);
        assert!(app.state.should_quit);
    }

    #[test]
    fn generate_needs_both_images() {
        let mut app = app();
        app.update(AppMessage::Generate);
        assert_eq!(app.session.state(), AppState::Idle);
    }

    #[test]
    fn keys_reach_the_focused_panel() {
        let mut app = app();
        app.update(AppMessage::FocusPrev);
        let msg = app.route_key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE));
        assert_eq!(msg, Some(AppMessage::SetInstruction("h".to_string())));

        app.update(AppMessage::FocusNext);
        assert_eq!(
            app.route_key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE)),
            None
        );
        assert_eq!(app.room.input(), "h");
    }
}
