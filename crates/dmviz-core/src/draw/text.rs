//! Column-aware padding, truncation and centering.
//!
//! Widths are terminal columns as reported by [`unicode_width`], so a wide
//! emoji such as `🟢` counts as two columns and combining marks count as zero.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marker appended to text clipped by [`truncate`] and [`fit`].
pub const ELLIPSIS: char = '…';

/// Returns the display width of `text` in terminal columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Right-pads `text` with spaces to `width` columns. Longer text is returned unchanged.
pub fn pad(text: &str, width: usize) -> String {
    let missing = width.saturating_sub(display_width(text));
    let mut padded = String::with_capacity(text.len() + missing);
    padded.push_str(text);
    padded.extend(std::iter::repeat_n(' ', missing));
    padded
}

/// Clips `text` to at most `width` columns, ending clipped text with [`ELLIPSIS`].
pub fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut clipped = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        clipped.push(ch);
        used += w;
    }
    // Variation selectors can widen the preceding glyph beyond its per-char width.
    while display_width(&clipped) > budget {
        clipped.pop();
    }
    clipped.push(ELLIPSIS);
    clipped
}

/// Truncates and pads `text` to exactly `width` columns.
pub fn fit(text: &str, width: usize) -> String {
    pad(&truncate(text, width), width)
}

/// Centers `text` within `width` columns, clipping it when it does not fit.
pub fn center(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let free = width.saturating_sub(display_width(&text));
    let left = free / 2;
    let mut centered = " ".repeat(left);
    centered.push_str(&text);
    pad(&centered, width)
}
