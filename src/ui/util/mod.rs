pub mod handler;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Keeps the end of `text` (the file name end of a path) within `width`
/// columns, marking a cut with an ellipsis.
pub fn tail_fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut kept = Vec::new();
    let mut used = 1;
    for ch in text.chars().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        kept.push(ch);
    }

    std::iter::once('…').chain(kept.into_iter().rev()).collect()
}

pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(tail_fit("room.png", 20), "room.png");
    }

    #[test]
    fn long_paths_keep_their_tail() {
        let fitted = tail_fit("/home/me/Pictures/living-room.png", 16);
        assert_eq!(fitted, "…living-room.png");
        assert!(fitted.width() <= 16);
    }

    #[test]
    fn wide_characters_are_measured_by_columns() {
        let fitted = tail_fit("写真/部屋.png", 8);
        assert!(fitted.width() <= 8);
        assert!(fitted.ends_with(".png"));
    }
}
