//! Rendering theme passed explicitly to every renderer.

use super::{
    glyph::{GlyphSet, Status},
    layout::{Layout, RECOMMENDED_WIDTH, WIDE_THRESHOLD, narrow_width_warning},
};

/// Formatting constants for one rendering run.
///
/// A `Theme` is a small value type; each renderer receives it by reference so
/// that concurrent renders with different settings never interfere.
///
/// # Examples
///
/// ```
/// # use dmviz_core::draw::{GlyphSet, Layout, Status, Theme};
/// let theme = Theme::default().with_glyphs(GlyphSet::Ascii);
/// assert_eq!(theme.layout(89), Layout::Compact);
/// assert_eq!(theme.glyph(Status::Accept), "A");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    wide_threshold: usize,
    recommended_width: usize,
    glyphs: GlyphSet,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            wide_threshold: WIDE_THRESHOLD,
            recommended_width: RECOMMENDED_WIDTH,
            glyphs: GlyphSet::default(),
        }
    }
}

impl Theme {
    /// Creates a theme from explicit settings.
    pub fn new(wide_threshold: usize, recommended_width: usize, glyphs: GlyphSet) -> Self {
        Self {
            wide_threshold,
            recommended_width,
            glyphs,
        }
    }

    /// Returns a copy using a different glyph set.
    pub fn with_glyphs(mut self, glyphs: GlyphSet) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Returns the minimum width for [`Layout::Wide`].
    pub fn wide_threshold(&self) -> usize {
        self.wide_threshold
    }

    /// Returns the width below which a narrow-terminal advisory is produced.
    pub fn recommended_width(&self) -> usize {
        self.recommended_width
    }

    /// Returns the glyph set.
    pub fn glyphs(&self) -> GlyphSet {
        self.glyphs
    }

    /// Selects the layout for `width`.
    pub fn layout(&self, width: usize) -> Layout {
        Layout::select(width, self.wide_threshold)
    }

    /// Looks up the glyph for `status`.
    pub fn glyph(&self, status: Status) -> &'static str {
        self.glyphs.glyph(status)
    }

    /// Returns the narrow-terminal advisory for `width`, if any.
    pub fn narrow_width_warning(&self, width: usize) -> Option<String> {
        narrow_width_warning(width, self.recommended_width)
    }
}
