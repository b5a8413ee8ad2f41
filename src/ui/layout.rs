use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    studio::state::AppState,
    ui::{
        app::App,
        components::{
            banner::ErrorBanner, header::Header, processing::ProcessingView, result::ResultView,
        },
        state::Focus,
        traits::Component,
    },
    util::colors,
};

pub struct AppLayout<'a> {
    pub app: &'a mut App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn render(mut self, f: &mut Frame, area: Rect) {
        let buf = f.buffer_mut();
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        let error = self.app.session.controller().error().map(str::to_string);
        let banner_height = if error.is_some() { 3 } else { 0 };

        let [header_area, banner_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(banner_height),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        f.render_widget(Header::new(&self.app.model), header_area);
        if let Some(message) = &error {
            f.render_widget(ErrorBanner::new(message), banner_area);
        }

        let state = self.app.session.state();
        match state {
            AppState::Idle | AppState::Error => self.render_inputs(f, body_area),
            AppState::Processing => {
                f.render_widget(ProcessingView::new(self.app.session.steps()), body_area)
            }
            AppState::Complete => f.render_widget(ResultView::new(&self.app.session), body_area),
        }

        f.render_widget(Paragraph::new(self.footer(state)), footer_area);
    }

    fn render_inputs(&mut self, f: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);
        let [room_area, dimensions_area] =
            Layout::vertical([Constraint::Min(6), Constraint::Length(4)]).areas(left);
        let [furniture_area, instruction_area] =
            Layout::vertical([Constraint::Min(6), Constraint::Length(4)]).areas(right);

        let app = &mut *self.app;
        let focus = app.state.focus;
        app.room
            .render(f, room_area, &app.session, focus == Focus::RoomUpload);
        app.dimensions
            .render(f, dimensions_area, &app.session, focus == Focus::Dimensions);
        app.furniture
            .render(f, furniture_area, &app.session, focus == Focus::FurnitureUpload);
        app.instruction
            .render(f, instruction_area, &app.session, focus == Focus::Instruction);
    }

    fn footer(&self, state: AppState) -> Line<'static> {
        let key = |k: &'static str| Span::styled(k, Style::new().fg(colors::ACCENT));
        let text = |t: &'static str| Span::styled(t, Style::new().fg(colors::MUTED));

        let mut spans = vec![Span::raw(" ")];
        match state {
            AppState::Idle | AppState::Error => {
                spans.extend([key("Tab"), text(" next field  ")]);
                if self.app.session.controller().can_generate() {
                    spans.extend([key("Ctrl-G"), text(" generate  ")]);
                } else {
                    spans.push(text("add both images to generate  "));
                }
                if state == AppState::Error {
                    spans.extend([key("Esc"), text(" dismiss  ")]);
                }
            }
            AppState::Processing => spans.extend([key("Esc"), text(" cancel  ")]),
            AppState::Complete => {
                spans.extend([key("s"), text(" save  "), key("r"), text(" try again  ")]);
            }
        }
        spans.extend([key("Ctrl-C"), text(" quit")]);
        Line::from(spans)
    }
}
