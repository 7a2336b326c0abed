//! Bordered boxes with an optional title, header and body.

use super::border::{BorderPosition, BorderStyle, boxed_line, draw_border, title_line};

/// A bordered box rendered at a fixed width.
///
/// Layout, top to bottom: the top border, the centered title (if any), the
/// header lines, the body lines and the bottom border. A middle border is
/// drawn between adjacent non-empty sections.
///
/// # Examples
///
/// ```
/// # use dmviz_core::draw::{BorderStyle, Card};
/// let lines = Card::new(BorderStyle::Double)
///     .with_title("FIREWALL")
///     .with_body_line("Enable: 1")
///     .render(16);
///
/// assert_eq!(lines, vec![
///     "╔══════════════╗",
///     "║   FIREWALL   ║",
///     "╠══════════════╣",
///     "║  Enable: 1   ║",
///     "╚══════════════╝",
/// ]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    style: BorderStyle,
    title: Option<String>,
    header: Vec<String>,
    body: Vec<String>,
}

impl Card {
    /// Creates an empty card.
    pub fn new(style: BorderStyle) -> Self {
        Self {
            style,
            title: None,
            header: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Sets the centered title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Appends a header line.
    pub fn with_header_line(mut self, line: impl Into<String>) -> Self {
        self.push_header(line);
        self
    }

    /// Appends a body line.
    pub fn with_body_line(mut self, line: impl Into<String>) -> Self {
        self.push_body(line);
        self
    }

    /// Appends a header line.
    pub fn push_header(&mut self, line: impl Into<String>) {
        self.header.push(line.into());
    }

    /// Appends a body line.
    pub fn push_body(&mut self, line: impl Into<String>) {
        self.body.push(line.into());
    }

    /// Renders the card at exactly `width` columns per line.
    pub fn render(&self, width: usize) -> Vec<String> {
        let style = self.style;
        let middle = || draw_border(style, BorderPosition::Middle, width);
        let mut lines = vec![draw_border(style, BorderPosition::Top, width)];

        let mut previous_section = false;
        if let Some(title) = &self.title {
            lines.push(title_line(style, title, width));
            previous_section = true;
        }
        for section in [&self.header, &self.body] {
            if section.is_empty() {
                continue;
            }
            if previous_section {
                lines.push(middle());
            }
            lines.extend(section.iter().map(|line| boxed_line(style, line, width)));
            previous_section = true;
        }

        lines.push(draw_border(style, BorderPosition::Bottom, width));
        lines
    }
}
