use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::util::colors;

/// The error strip shown above the inputs.
pub struct ErrorBanner<'a> {
    message: &'a str,
}

impl<'a> ErrorBanner<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Widget for ErrorBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::new().fg(colors::ERROR));

        Paragraph::new(Line::from(vec![
            Span::styled(
                " ✗ ",
                Style::new().fg(colors::ERROR).add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.message, Style::new().fg(colors::TEXT)),
            Span::styled("  (Esc to dismiss)", Style::new().fg(colors::MUTED)),
        ]))
        .wrap(Wrap { trim: true })
        .block(block)
        .render(area, buf);
    }
}
