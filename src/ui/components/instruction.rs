use ratatui::{
    Frame,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    layout::Rect,
    style::Style,
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    studio::session::Session,
    ui::{message::AppMessage, traits::Component},
    util::colors,
};

const PLACEHOLDER: &str = "e.g. Place it in the center, rotate slightly to the left...";

/// Free text forwarded as is with the composite request.
#[derive(Default)]
pub struct InstructionField;

impl InstructionField {
    pub fn new() -> Self {
        Self
    }

    fn edited(session: &Session, edit: impl FnOnce(&mut String)) -> Option<AppMessage> {
        let mut text = session.controller().instruction().to_string();
        edit(&mut text);
        Some(AppMessage::SetInstruction(text))
    }
}

impl Component for InstructionField {
    fn render(&mut self, f: &mut Frame, area: Rect, session: &Session, focused: bool) {
        let border_color = if focused { colors::PRIMARY } else { colors::NEUTRAL };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::new().fg(border_color))
            .title(" Placement Instructions (optional) ");

        let text = session.controller().instruction();
        let line = if text.is_empty() && !focused {
            Line::from(Span::styled(PLACEHOLDER, Style::new().fg(colors::MUTED)))
        } else {
            let mut spans = vec![Span::styled(text, Style::new().fg(colors::TEXT))];
            if focused {
                spans.push(Span::styled("▏", Style::new().fg(colors::ACCENT)));
            }
            Line::from(spans)
        };

        f.render_widget(
            Paragraph::new(line)
                .wrap(Wrap { trim: false })
                .block(block),
            area,
        );
    }

    fn handle_input(&mut self, key: KeyEvent, session: &Session) -> Option<AppMessage> {
        if !session.state().shows_inputs() || key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        match key.code {
            KeyCode::Char(c) => Self::edited(session, |text| text.push(c)),
            KeyCode::Backspace if !session.controller().instruction().is_empty() => {
                Self::edited(session, |text| {
                    text.pop();
                })
            }
            _ => None,
        }
    }

    fn handle_paste(&mut self, pasted: &str, session: &Session) -> Option<AppMessage> {
        if !session.state().shows_inputs() {
            return None;
        }
        let flattened = pasted.replace(['\r', '\n'], " ");
        Self::edited(session, |text| text.push_str(&flattened))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::testing;

    #[test]
    fn typing_and_paste_build_the_instruction() {
        let mut session = testing::session();
        let mut field = InstructionField::new();

        for c in "by the".chars() {
            let msg = field.handle_input(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE), &session);
            if let Some(AppMessage::SetInstruction(text)) = msg {
                session.set_instruction(text);
            }
        }
        let msg = field.handle_paste(" window\nplease", &session);
        assert_eq!(
            msg,
            Some(AppMessage::SetInstruction("by the window please".to_string()))
        );
    }

    #[test]
    fn backspace_on_empty_does_nothing() {
        let session = testing::session();
        let mut field = InstructionField::new();
        assert_eq!(
            field.handle_input(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE), &session),
            None
        );
    }
}
