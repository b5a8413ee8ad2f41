use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::{
    studio::state::{ProcessingStep, StepStatus},
    ui::{components::gauge::StepGauge, components::spinner, util::centered},
    util::colors,
};

const WIDTH: u16 = 56;

pub struct ProcessingView<'a> {
    steps: &'a [ProcessingStep],
}

impl<'a> ProcessingView<'a> {
    pub fn new(steps: &'a [ProcessingStep]) -> Self {
        Self { steps }
    }

    /// Fraction finished, and fraction finished or under way.
    fn ratios(&self) -> (f64, f64) {
        let total = self.steps.len().max(1) as f64;
        let done = self
            .steps
            .iter()
            .filter(|s| s.status == StepStatus::Completed)
            .count() as f64;
        let active = self
            .steps
            .iter()
            .filter(|s| s.status == StepStatus::Active)
            .count() as f64;
        (done / total, (done + active) / total)
    }

    fn step_line(step: &ProcessingStep) -> Line<'static> {
        let (icon, icon_style, text_style) = match step.status {
            StepStatus::Completed => (
                "✓",
                Style::new().fg(colors::SUCCESS),
                Style::new().fg(colors::MUTED),
            ),
            StepStatus::Active => (
                spinner::frame(),
                Style::new().fg(colors::ACCENT),
                Style::new().fg(colors::TEXT).add_modifier(Modifier::BOLD),
            ),
            StepStatus::Pending => (
                "○",
                Style::new().fg(colors::NEUTRAL),
                Style::new().fg(colors::NEUTRAL),
            ),
        };

        Line::from(vec![
            Span::styled(format!(" {} ", icon), icon_style),
            Span::styled(step.label, text_style),
        ])
    }
}

impl Widget for ProcessingView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = 5 + self.steps.len() as u16 + 2;
        let area = centered(area, WIDTH.min(area.width), height.min(area.height));

        let [title_area, subtitle_area, _, gauge_area, _, steps_area, hint_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(self.steps.len() as u16),
                Constraint::Length(2),
            ])
            .areas(area);

        Paragraph::new(Span::styled(
            "Generating Scene",
            Style::new().fg(colors::TEXT).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(title_area, buf);

        Paragraph::new(Span::styled(
            "Compositing your furniture into the room",
            Style::new().fg(colors::MUTED),
        ))
        .alignment(Alignment::Center)
        .render(subtitle_area, buf);

        let (done, reached) = self.ratios();
        StepGauge::default()
            .ratios(done, reached)
            .label(format!("{}%", (done * 100.0).round() as u16))
            .use_unicode(true)
            .done_style(Style::new().fg(colors::PRIMARY).bg(colors::BACKGROUND))
            .active_style(Style::new().fg(colors::SECONDARY).bg(colors::BACKGROUND))
            .remaining_style(Style::new().fg(colors::NEUTRAL).bg(colors::BACKGROUND))
            .render(gauge_area, buf);

        let lines: Vec<Line> = self.steps.iter().map(Self::step_line).collect();
        Paragraph::new(lines).render(steps_area, buf);

        Paragraph::new(Span::styled("Esc to cancel", Style::new().fg(colors::MUTED)))
            .alignment(Alignment::Center)
            .render(hint_area, buf);
    }
}
