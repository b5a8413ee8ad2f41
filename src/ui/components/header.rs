use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::util::colors;

pub const TITLE: &str = "RoomVision AI";

pub struct Header<'a> {
    model: &'a str,
}

impl<'a> Header<'a> {
    pub fn new(model: &'a str) -> Self {
        Self { model }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::new().fg(colors::NEUTRAL));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Line::from(vec![
            Span::styled(" ◆ ", Style::new().fg(colors::PRIMARY)),
            Span::styled(
                TITLE,
                Style::new().fg(colors::TEXT).add_modifier(Modifier::BOLD),
            ),
        ]))
        .render(inner, buf);

        Paragraph::new(Line::from(vec![
            Span::styled("model ", Style::new().fg(colors::MUTED)),
            Span::styled(self.model, Style::new().fg(colors::ACCENT)),
            Span::raw(" "),
        ]))
        .alignment(Alignment::Right)
        .render(inner, buf);
    }
}
