use crate::{studio::state::AppState, ui::message::AppMessage};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    /// Keys that mean the same thing whatever is focused. Anything else goes
    /// to the focused panel.
    pub fn handle_key(key: KeyEvent, state: AppState) -> Option<AppMessage> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppMessage::Quit),
            (KeyCode::Char('g'), KeyModifiers::CONTROL) | (KeyCode::F(5), _) => {
                Some(AppMessage::Generate)
            }
            (KeyCode::Esc, _) => match state {
                AppState::Processing => Some(AppMessage::Cancel),
                AppState::Error => Some(AppMessage::DismissError),
                _ => None,
            },
            (KeyCode::Tab, _) if state.shows_inputs() => Some(AppMessage::FocusNext),
            (KeyCode::BackTab, _) if state.shows_inputs() => Some(AppMessage::FocusPrev),
            (KeyCode::Char('r'), _) if state == AppState::Complete => Some(AppMessage::Reset),
            (KeyCode::Char('s'), _) if state == AppState::Complete => Some(AppMessage::Save),
            (KeyCode::Char('q'), _) if state == AppState::Complete => Some(AppMessage::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn escape_depends_on_screen() {
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Esc), AppState::Processing),
            Some(AppMessage::Cancel)
        );
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Esc), AppState::Error),
            Some(AppMessage::DismissError)
        );
        assert_eq!(InputHandler::handle_key(key(KeyCode::Esc), AppState::Idle), None);
    }

    #[test]
    fn result_keys_only_apply_on_result_screen() {
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Char('s')), AppState::Complete),
            Some(AppMessage::Save)
        );
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Char('r')), AppState::Complete),
            Some(AppMessage::Reset)
        );
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Char('s')), AppState::Idle),
            None
        );
    }

    #[test]
    fn generate_shortcuts() {
        let ctrl_g = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL);
        assert_eq!(
            InputHandler::handle_key(ctrl_g, AppState::Idle),
            Some(AppMessage::Generate)
        );
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::F(5)), AppState::Error),
            Some(AppMessage::Generate)
        );
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Tab), AppState::Processing),
            None
        );
    }
}
