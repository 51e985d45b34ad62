//! Helper functions for UI rendering.

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// List width as a fraction of the terminal width.
const LIST_WIDTH_PERCENT: f32 = 0.915;

/// Truncate a string to fit within `max_width` columns, adding "..." if
/// truncated. Safe for multi-byte and wide characters.
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = if max_width > 3 { max_width - 3 } else { max_width };

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    if max_width > 3 {
        out.push_str("...");
    }
    out
}

/// Spaces needed to right-align `right` after `left` within `width` columns.
pub fn padding_between(left: &str, right: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(left.width() + right.width()))
}

/// Horizontally centered area.
pub fn centered_area(area: Rect) -> Rect {
    let width = (area.width as f32 * LIST_WIDTH_PERCENT).round() as u16;
    let left_padding = area.width.saturating_sub(width) / 2;
    Rect::new(area.x + left_padding, area.y, width, area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long itinerary name", 10), "a long ...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Passeio em São João", 12), "Passeio e...");
        assert_eq!(truncate("São", 3), "São");
    }

    #[test]
    fn test_padding_between() {
        assert_eq!(padding_between("ab", "cd", 7), "   ");
        assert_eq!(padding_between("abcdef", "gh", 4), "");
    }

    #[test]
    fn test_centered_area() {
        let area = centered_area(Rect::new(0, 0, 100, 10));
        assert_eq!(area.width, 92);
        assert_eq!(area.x, 4);
    }
}
