//! Text rendering primitives shared by every visualizer.
//!
//! All functions here are pure: they take the already-resolved terminal width
//! and a [`Theme`] explicitly and return owned lines. Nothing writes to a
//! terminal and there is no global formatting state.
//!
//! # Overview
//!
//! - [`Layout`] - Wide or compact rendering, selected from the terminal width
//! - [`BorderStyle`] / [`BorderPosition`] - Box-drawing character sets
//! - [`Status`] / [`GlyphSet`] - Status indicator lookup table
//! - [`Table`] - Summary tables rendered as aligned columns or stacked cards
//! - [`Card`] - A bordered box with an optional title, header and body
//! - [`Theme`] - Thresholds and glyph set passed to every renderer

mod border;
mod card;
mod glyph;
mod layout;
mod table;
mod text;
mod theme;

pub use border::{BorderPosition, BorderStyle, boxed_line, draw_border, title_line};
pub use card::Card;
pub use glyph::{GlyphSet, PLACEHOLDER, Status};
pub use layout::{
    FALLBACK_WIDTH, Layout, RECOMMENDED_WIDTH, WIDE_THRESHOLD, narrow_width_warning, select_layout,
};
pub use table::Table;
pub use text::{ELLIPSIS, center, display_width, fit, pad, truncate};
pub use theme::Theme;
