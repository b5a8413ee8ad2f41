use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Block, Widget},
};

/// Two-band bar: finished work, then the step in progress, then the rest.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StepGauge<'a> {
    block: Option<Block<'a>>,
    done_ratio: f64,
    reached_ratio: f64,
    label: Option<Span<'a>>,
    use_unicode: bool,
    style: Style,
    done_style: Style,
    active_style: Style,
    remaining_style: Style,
}

impl<'a> StepGauge<'a> {
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// `reached` covers the active step as well; it never trails `done`.
    pub fn ratios(mut self, done: f64, reached: f64) -> Self {
        self.done_ratio = done.clamp(0.0, 1.0);
        self.reached_ratio = reached.clamp(self.done_ratio, 1.0);
        self
    }

    pub fn label<T>(mut self, label: T) -> Self
    where
        T: Into<Span<'a>>,
    {
        self.label = Some(label.into());
        self
    }

    pub const fn use_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }

    pub fn style<S: Into<Style>>(mut self, style: S) -> Self {
        self.style = style.into();
        self
    }

    pub fn done_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.done_style = style.into();
        self
    }

    pub fn active_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.active_style = style.into();
        self
    }

    pub fn remaining_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.remaining_style = style.into();
        self
    }
}

fn get_unicode_block(frac: f64) -> &'static str {
    match (frac * 8.0).round() as u16 {
        0 => " ",
        1 => symbols::block::ONE_EIGHTH,
        2 => symbols::block::ONE_QUARTER,
        3 => symbols::block::THREE_EIGHTHS,
        4 => symbols::block::HALF,
        5 => symbols::block::FIVE_EIGHTHS,
        6 => symbols::block::THREE_QUARTERS,
        7 => symbols::block::SEVEN_EIGHTHS,
        _ => symbols::block::FULL,
    }
}

impl Widget for StepGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.style);
        if let Some(ref block) = self.block {
            block.render(area, buf);
        }

        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        if inner.is_empty() {
            return;
        }

        self.render_gauge(inner, buf);
    }
}

impl StepGauge<'_> {
    fn render_gauge(&self, gauge_area: Rect, buf: &mut Buffer) {
        let width = gauge_area.width as f64;
        let done_pos = width * self.done_ratio;
        let reached_pos = width * self.reached_ratio;

        let fallback = Span::raw(format!("{}%", (self.done_ratio * 100.0).round() as u16));
        let label = self.label.as_ref().unwrap_or(&fallback);
        let label_width = (label.width() as u16).min(gauge_area.width);

        let label_col = gauge_area.left() + (gauge_area.width - label_width) / 2;
        let label_row = gauge_area.top() + gauge_area.height / 2;

        for y in gauge_area.top()..gauge_area.bottom() {
            for x in gauge_area.left()..gauge_area.right() {
                let pos = (x - gauge_area.left()) as f64;

                let mut symbol = symbols::block::FULL;
                let mut style = self.remaining_style;

                if pos < done_pos {
                    style = self.done_style;
                    if self.use_unicode && pos + 1.0 > done_pos {
                        symbol = get_unicode_block(done_pos - pos);
                    }
                } else if pos < reached_pos {
                    style = self.active_style;
                    if self.use_unicode && pos + 1.0 > reached_pos {
                        symbol = get_unicode_block(reached_pos - pos);
                    }
                } else if self.use_unicode {
                    symbol = " ";
                }

                if x >= label_col && x < label_col + label_width && y == label_row {
                    symbol = " ";
                    style = style.bg(style.fg.unwrap_or_default());
                }

                buf[(x, y)]
                    .set_symbol(symbol)
                    .set_fg(style.fg.unwrap_or_default())
                    .set_bg(style.bg.unwrap_or_default());
            }
        }

        buf.set_span(label_col, label_row, label, label_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn ratios_are_clamped_and_ordered() {
        let gauge = StepGauge::default().ratios(0.5, 0.2);
        assert_eq!(gauge.done_ratio, 0.5);
        assert_eq!(gauge.reached_ratio, 0.5);

        let gauge = StepGauge::default().ratios(-1.0, 3.0);
        assert_eq!(gauge.done_ratio, 0.0);
        assert_eq!(gauge.reached_ratio, 1.0);
    }

    #[test]
    fn bands_fill_left_to_right() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        StepGauge::default()
            .ratios(0.3, 0.6)
            .label("")
            .done_style(Style::default().fg(Color::Green))
            .active_style(Style::default().fg(Color::Yellow))
            .remaining_style(Style::default().fg(Color::DarkGray))
            .render(area, &mut buf);

        assert_eq!(buf[(0, 0)].fg, Color::Green);
        assert_eq!(buf[(4, 0)].fg, Color::Yellow);
        assert_eq!(buf[(9, 0)].fg, Color::DarkGray);
    }
}
