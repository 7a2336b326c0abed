//! Configuration types for dmviz rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out and which glyphs they use. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`RenderConfig`] - Layout threshold, advisory width, fallback width and glyph set.
//!
//! # Example
//!
//! ```
//! # use dmviz::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.render().wide_threshold(), 90);
//! assert_eq!(config.render().fallback_width(), 80);
//! ```

use serde::Deserialize;

use dmviz_core::draw::{FALLBACK_WIDTH, GlyphSet, RECOMMENDED_WIDTH, Theme, WIDE_THRESHOLD};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified render configuration.
    pub fn new(render: RenderConfig) -> Self {
        Self { render }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }
}

/// Rendering settings.
///
/// Fields that are not set in a configuration file keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Minimum terminal width for the wide layout.
    wide_threshold: usize,

    /// Terminal width below which an advisory is printed.
    recommended_width: usize,

    /// Width assumed when the terminal size cannot be detected.
    fallback_width: usize,

    /// Status indicator set.
    glyphs: GlyphSet,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            wide_threshold: WIDE_THRESHOLD,
            recommended_width: RECOMMENDED_WIDTH,
            fallback_width: FALLBACK_WIDTH,
            glyphs: GlyphSet::default(),
        }
    }
}

impl RenderConfig {
    /// Returns a copy using a different glyph set.
    pub fn with_glyphs(mut self, glyphs: GlyphSet) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Returns the minimum terminal width for the wide layout.
    pub fn wide_threshold(&self) -> usize {
        self.wide_threshold
    }

    /// Returns the width below which an advisory is printed.
    pub fn recommended_width(&self) -> usize {
        self.recommended_width
    }

    /// Returns the width assumed when detection fails.
    pub fn fallback_width(&self) -> usize {
        self.fallback_width
    }

    /// Returns the glyph set.
    pub fn glyphs(&self) -> GlyphSet {
        self.glyphs
    }

    /// Builds the [`Theme`] passed to every renderer.
    pub fn theme(&self) -> Theme {
        Theme::new(self.wide_threshold, self.recommended_width, self.glyphs)
    }
}
