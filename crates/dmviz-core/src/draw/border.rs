//! Box-drawing borders and bordered lines.
//!
//! Every visualizer draws its boxes through these functions so that borders
//! look identical across diagrams.

use super::text::{center, fit};

/// Columns of indentation between a vertical border and the line content.
const CONTENT_INDENT: usize = 2;

/// Character set used for a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderStyle {
    /// `╔═╗ ╠═╣ ╚═╝` with `║` sides, used for overview and title boxes.
    Double,
    /// `┌─┐ ├─┤ └─┘` with `│` sides, used for cards.
    Single,
    /// A bare `═` line without corners or sides, used around summaries.
    Rule,
}

/// Which horizontal edge of a box is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderPosition {
    Top,
    Middle,
    Bottom,
}

struct BorderChars {
    horizontal: char,
    vertical: Option<char>,
    top: Option<(char, char)>,
    middle: Option<(char, char)>,
    bottom: Option<(char, char)>,
}

const DOUBLE: BorderChars = BorderChars {
    horizontal: '═',
    vertical: Some('║'),
    top: Some(('╔', '╗')),
    middle: Some(('╠', '╣')),
    bottom: Some(('╚', '╝')),
};

const SINGLE: BorderChars = BorderChars {
    horizontal: '─',
    vertical: Some('│'),
    top: Some(('┌', '┐')),
    middle: Some(('├', '┤')),
    bottom: Some(('└', '┘')),
};

const RULE: BorderChars = BorderChars {
    horizontal: '═',
    vertical: None,
    top: None,
    middle: None,
    bottom: None,
};

impl BorderStyle {
    fn chars(self) -> &'static BorderChars {
        match self {
            Self::Double => &DOUBLE,
            Self::Single => &SINGLE,
            Self::Rule => &RULE,
        }
    }
}

impl BorderChars {
    fn corners(&self, position: BorderPosition) -> Option<(char, char)> {
        match position {
            BorderPosition::Top => self.top,
            BorderPosition::Middle => self.middle,
            BorderPosition::Bottom => self.bottom,
        }
    }
}

/// Draws a horizontal border of exactly `width` characters.
///
/// # Examples
///
/// ```
/// # use dmviz_core::draw::{BorderPosition, BorderStyle, draw_border};
/// assert_eq!(draw_border(BorderStyle::Single, BorderPosition::Top, 5), "┌───┐");
/// assert_eq!(draw_border(BorderStyle::Rule, BorderPosition::Top, 3), "═══");
/// ```
pub fn draw_border(style: BorderStyle, position: BorderPosition, width: usize) -> String {
    let chars = style.chars();
    match chars.corners(position) {
        Some((left, right)) if width >= 2 => {
            let mut line = String::with_capacity(width * 3);
            line.push(left);
            line.extend(std::iter::repeat_n(chars.horizontal, width - 2));
            line.push(right);
            line
        }
        _ => std::iter::repeat_n(chars.horizontal, width).collect(),
    }
}

/// Renders `text` between vertical borders at exactly `width` columns.
///
/// Content is indented by two columns, padded on the right and, when too
/// long, truncated with an ellipsis. It never fails on overlong text.
pub fn boxed_line(style: BorderStyle, text: &str, width: usize) -> String {
    let content = format!("{}{text}", " ".repeat(CONTENT_INDENT));
    match style.chars().vertical {
        Some(side) if width >= 2 => format!("{side}{}{side}", fit(&content, width - 2)),
        _ => fit(&content, width),
    }
}

/// Renders `text` centered between vertical borders at exactly `width` columns.
pub fn title_line(style: BorderStyle, text: &str, width: usize) -> String {
    match style.chars().vertical {
        Some(side) if width >= 2 => format!("{side}{}{side}", center(text, width - 2)),
        _ => center(text, width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::display_width;

    #[test]
    fn test_draw_border_variants() {
        assert_eq!(draw_border(BorderStyle::Double, BorderPosition::Top, 6), "╔════╗");
        assert_eq!(draw_border(BorderStyle::Double, BorderPosition::Middle, 6), "╠════╣");
        assert_eq!(draw_border(BorderStyle::Double, BorderPosition::Bottom, 6), "╚════╝");
        assert_eq!(draw_border(BorderStyle::Single, BorderPosition::Middle, 4), "├──┤");
        assert_eq!(draw_border(BorderStyle::Single, BorderPosition::Bottom, 4), "└──┘");
        assert_eq!(draw_border(BorderStyle::Rule, BorderPosition::Bottom, 4), "════");
    }

    #[test]
    fn test_draw_border_exact_width() {
        for width in 0..10 {
            for style in [BorderStyle::Double, BorderStyle::Single, BorderStyle::Rule] {
                let border = draw_border(style, BorderPosition::Top, width);
                assert_eq!(border.chars().count(), width);
            }
        }
    }

    #[test]
    fn test_boxed_line_pads() {
        assert_eq!(boxed_line(BorderStyle::Single, "ab", 8), "│  ab  │");
        assert_eq!(boxed_line(BorderStyle::Double, "ab", 8), "║  ab  ║");
        assert_eq!(boxed_line(BorderStyle::Rule, "ab", 6), "  ab  ");
    }

    #[test]
    fn test_boxed_line_truncates_overlong_text() {
        let line = boxed_line(BorderStyle::Single, "a very long line of text", 12);
        assert_eq!(line, "│  a very …│");
        assert_eq!(display_width(&line), 12);
    }

    #[test]
    fn test_boxed_line_with_glyphs_keeps_width() {
        let line = boxed_line(BorderStyle::Single, "🟢 Chain 1: Forward", 30);
        assert_eq!(display_width(&line), 30);
        assert!(line.ends_with('│'));
    }

    #[test]
    fn test_title_line() {
        assert_eq!(title_line(BorderStyle::Double, "FW", 8), "║  FW  ║");
    }
}
