use ratatui::crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::{studio::session::Session, ui::message::AppMessage};

/// An input panel. Panels read everything they show from the session and
/// answer keys with messages; they never mutate the session themselves.
pub trait Component: Send {
    fn render(&mut self, f: &mut Frame, area: Rect, session: &Session, focused: bool);
    fn handle_input(&mut self, key: KeyEvent, session: &Session) -> Option<AppMessage>;
    fn handle_paste(&mut self, _text: &str, _session: &Session) -> Option<AppMessage> {
        None
    }
}
