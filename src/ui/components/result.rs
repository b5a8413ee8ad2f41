use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    studio::{session::Session, state::ImageSlot},
    util::colors,
};

pub const ANALYSIS: [&str; 3] = [
    "Perspective matched to floor plane",
    "Lighting temperature adapted",
    "Contact shadows generated",
];

/// The generated scene next to the two inputs it came from.
pub struct ResultView<'a> {
    session: &'a Session,
}

impl<'a> ResultView<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    fn framed(title: &str, accent: bool) -> Block<'static> {
        let color = if accent { colors::PRIMARY } else { colors::NEUTRAL };
        Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::new().fg(color))
            .title(format!(" {} ", title))
    }

    fn render_picture(&self, slot: Option<ImageSlot>, title: &str, area: Rect, buf: &mut Buffer) {
        let block = Self::framed(title, slot.is_none());
        let inner = block.inner(area);
        block.render(area, buf);

        let thumbnail = match slot {
            Some(slot) => self
                .session
                .preview(slot)
                .and_then(|p| p.thumbnail.as_ref()),
            None => self.session.result_preview(),
        };

        match thumbnail {
            Some(thumbnail) => thumbnail.render(inner, buf),
            None => Paragraph::new("Preview unavailable")
                .style(Style::new().fg(colors::MUTED))
                .alignment(Alignment::Center)
                .render(inner, buf),
        }
    }

    fn render_details(&self, area: Rect, buf: &mut Buffer) {
        let block = Self::framed("Composition Details", false);
        let inner = block.inner(area);
        block.render(area, buf);

        let muted = Style::new().fg(colors::MUTED);
        let mut lines = vec![Line::styled(
            "AI Analysis",
            Style::new().fg(colors::TEXT).add_modifier(Modifier::BOLD),
        )];
        lines.extend(ANALYSIS.iter().map(|item| {
            Line::from(vec![
                Span::styled(" ✓ ", Style::new().fg(colors::SUCCESS)),
                Span::styled(*item, Style::new().fg(colors::TEXT)),
            ])
        }));
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("s", Style::new().fg(colors::ACCENT)),
            Span::styled(" save  ", muted),
            Span::styled("r", Style::new().fg(colors::ACCENT)),
            Span::styled(" try again", muted),
        ]));
        lines.push(Line::styled(
            format!("Saves to {}", self.session.download_path().display()),
            muted,
        ));
        if let Some(notice) = self.session.notice() {
            lines.push(Line::styled(notice, Style::new().fg(colors::SUCCESS)));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

impl Widget for ResultView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [main_area, side_area] =
            Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)])
                .areas(area);
        let [room_area, furniture_area, details_area] = Layout::vertical([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Min(9),
        ])
        .areas(side_area);

        self.render_picture(None, "Generated Result", main_area, buf);
        self.render_picture(Some(ImageSlot::Room), "Original Room", room_area, buf);
        self.render_picture(
            Some(ImageSlot::Furniture),
            "Placed Object",
            furniture_area,
            buf,
        );
        self.render_details(details_area, buf);
    }
}
