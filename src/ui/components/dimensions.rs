use ratatui::{
    Frame,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    studio::{
        session::Session,
        state::{DimensionField, ImageSlot, RoomDimensions},
    },
    ui::{components::spinner::Spinner, message::AppMessage, traits::Component},
    util::colors,
};

pub const MEASURING_LABEL: &str = "Scanning room geometry...";

/// Length, width and height of the room plus the unit. Every edit sends the
/// whole value back; nothing is kept here except which field is selected.
#[derive(Default)]
pub struct DimensionsForm {
    selected: usize,
}

impl DimensionsForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> DimensionField {
        DimensionField::ALL[self.selected % DimensionField::ALL.len()]
    }

    fn is_enabled(session: &Session) -> bool {
        session.state().shows_inputs()
            && session.controller().image(ImageSlot::Room).is_some()
            && !session.controller().is_measuring()
    }

    fn edit(&self, dims: &RoomDimensions, edit: impl FnOnce(&mut String) -> bool) -> Option<AppMessage> {
        let field = self.selected();
        let mut value = field.get(dims).to_string();
        edit(&mut value).then(|| AppMessage::SetDimensions(field.with(dims, value)))
    }
}

/// Digits and at most one decimal point.
fn accepts(value: &str, c: char) -> bool {
    c.is_ascii_digit() || (c == '.' && !value.contains('.'))
}

impl Component for DimensionsForm {
    fn render(&mut self, f: &mut Frame, area: Rect, session: &Session, focused: bool) {
        let enabled = Self::is_enabled(session);
        let border_color = if focused { colors::PRIMARY } else { colors::NEUTRAL };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::new().fg(border_color))
            .title(" Room Dimensions ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let [fields_area, status_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);

        let controller = session.controller();
        let dims = controller.dimensions();
        let muted = Style::new().fg(colors::MUTED);
        let value_style = if enabled {
            Style::new().fg(colors::TEXT)
        } else {
            muted
        };

        let mut spans = Vec::new();
        for (i, field) in DimensionField::ALL.iter().enumerate() {
            let value = field.get(dims);
            let shown = if value.is_empty() { "0" } else { value };
            let mut style = if value.is_empty() { muted } else { value_style };
            if focused && enabled && self.selected() == *field {
                style = style.fg(colors::ACCENT).add_modifier(Modifier::UNDERLINED);
            }

            if i > 0 {
                spans.push(Span::styled(" × ", muted));
            }
            spans.push(Span::styled(format!("{} ", field.label()), muted));
            spans.push(Span::styled(shown.to_string(), style));
        }
        spans.push(Span::styled(
            format!("  [{}]", dims.unit.as_str()),
            Style::new().fg(colors::ACCENT),
        ));
        f.render_widget(Paragraph::new(Line::from(spans)), fields_area);

        if controller.is_measuring() {
            f.render_widget(
                Spinner::default()
                    .with_style(Style::new().fg(colors::ACCENT))
                    .with_label(MEASURING_LABEL),
                status_area,
            );
        } else {
            let hint = if controller.image(ImageSlot::Room).is_none() {
                "Add a room photo to enter dimensions"
            } else {
                "←/→ field · u unit · a auto-measure"
            };
            f.render_widget(Paragraph::new(Span::styled(hint, muted)), status_area);
        }
    }

    fn handle_input(&mut self, key: KeyEvent, session: &Session) -> Option<AppMessage> {
        if !Self::is_enabled(session) {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        let dims = session.controller().dimensions();
        match key.code {
            KeyCode::Left | KeyCode::Up => {
                self.selected = (self.selected + DimensionField::ALL.len() - 1)
                    % DimensionField::ALL.len();
                None
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Enter => {
                self.selected = (self.selected + 1) % DimensionField::ALL.len();
                None
            }
            KeyCode::Char('u') => Some(AppMessage::SetDimensions(RoomDimensions {
                unit: dims.unit.toggled(),
                ..dims.clone()
            })),
            KeyCode::Char('a') => Some(AppMessage::AutoMeasure),
            KeyCode::Char(c) => self.edit(dims, |value| {
                if accepts(value, c) {
                    value.push(c);
                    true
                } else {
                    false
                }
            }),
            KeyCode::Backspace => self.edit(dims, |value| value.pop().is_some()),
            KeyCode::Delete => self.edit(dims, |value| {
                let had = !value.is_empty();
                value.clear();
                had
            }),
            _ => None,
        }
    }
}
