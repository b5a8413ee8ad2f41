use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    media::SelectedFile,
    studio::{session::Session, state::ImageSlot},
    ui::{
        components::spinner::Spinner, message::AppMessage, traits::Component, util::tail_fit,
    },
    util::colors,
};

const HOVER_TIME: Duration = Duration::from_millis(600);

/// Picks the image for one slot from a typed or dropped path.
pub struct Uploader {
    slot: ImageSlot,
    input: String,
    hover_until: Option<Instant>,
}

impl Uploader {
    pub fn new(slot: ImageSlot) -> Self {
        Self {
            slot,
            input: String::new(),
            hover_until: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_hovering(&self) -> bool {
        self.hover_until.is_some_and(|until| Instant::now() < until)
    }

    fn submit(&mut self) -> Option<AppMessage> {
        let raw = std::mem::take(&mut self.input);
        SelectedFile::from_input(&raw).map(|file| AppMessage::SelectFile(self.slot, file))
    }

    fn border_color(&self, focused: bool) -> ratatui::style::Color {
        if self.is_hovering() {
            colors::ACCENT
        } else if focused {
            colors::PRIMARY
        } else {
            colors::NEUTRAL
        }
    }
}

impl Component for Uploader {
    fn render(&mut self, f: &mut Frame, area: Rect, session: &Session, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::new().fg(self.border_color(focused)))
            .title(format!(" {} ", self.slot.label()));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let [preview_area, info_area, input_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let muted = Style::new().fg(colors::MUTED);
        let preview = session.preview(self.slot);

        if session.is_loading(self.slot) {
            f.render_widget(
                Spinner::default()
                    .with_style(Style::new().fg(colors::ACCENT))
                    .with_label("Reading image..."),
                preview_area,
            );
        } else if let Some(preview) = preview {
            match &preview.thumbnail {
                Some(thumbnail) => f.render_widget(thumbnail, preview_area),
                None => f.render_widget(
                    Paragraph::new("Preview unavailable")
                        .style(muted)
                        .alignment(Alignment::Center),
                    preview_area,
                ),
            }
        } else {
            let [_, hint_area] =
                Layout::vertical([Constraint::Percentage(40), Constraint::Min(2)]).areas(preview_area);
            f.render_widget(
                Paragraph::new(vec![
                    Line::styled("Drop an image here or type a path", Style::new().fg(colors::TEXT)),
                    Line::styled("PNG, JPG, GIF or WEBP", muted),
                ])
                .alignment(Alignment::Center),
                hint_area,
            );
        }

        if let (Some(preview), Some(image)) = (preview, session.controller().image(self.slot)) {
            let width = info_area.width as usize;
            f.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(
                        tail_fit(&preview.name, width.saturating_sub(24)),
                        Style::new().fg(colors::TEXT).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!(" · {}", image.mime_type()), muted),
                    Span::styled("  Del to remove", muted),
                ])),
                info_area,
            );
        }

        let prompt = Span::styled("› ", Style::new().fg(colors::PRIMARY));
        let text_width = (input_area.width as usize).saturating_sub(3);
        let mut spans = vec![prompt];
        if self.input.is_empty() && !focused {
            spans.push(Span::styled("path to image", muted));
        } else {
            spans.push(Span::styled(
                tail_fit(&self.input, text_width),
                Style::new().fg(colors::TEXT),
            ));
            if focused {
                spans.push(Span::styled("▏", Style::new().fg(colors::ACCENT)));
            }
        }
        f.render_widget(Paragraph::new(Line::from(spans)), input_area);
    }

    fn handle_input(&mut self, key: KeyEvent, session: &Session) -> Option<AppMessage> {
        if !session.state().shows_inputs() {
            return None;
        }

        let has_image = session.controller().image(self.slot).is_some();
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Delete if has_image => Some(AppMessage::ClearImage(self.slot)),
            KeyCode::Backspace => {
                if self.input.pop().is_none() && has_image {
                    Some(AppMessage::ClearImage(self.slot))
                } else {
                    None
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }

    /// A drop selects immediately. Only the first of several files counts.
    fn handle_paste(&mut self, text: &str, session: &Session) -> Option<AppMessage> {
        if !session.state().shows_inputs() {
            return None;
        }

        self.hover_until = Some(Instant::now() + HOVER_TIME);
        self.input = text.lines().next().unwrap_or_default().to_string();
        self.submit()
    }
}
