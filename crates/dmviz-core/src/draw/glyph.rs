//! Status indicators.
//!
//! Visualizers never pick glyphs themselves. They classify a condition as a
//! [`Status`] and look its glyph up in the configured [`GlyphSet`].

use serde::Deserialize;

/// Placeholder rendered in place of an absent value.
pub const PLACEHOLDER: &str = "-";

/// A condition rendered as a single indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Enabled,
    Disabled,
    Accept,
    Drop,
    Reject,
    /// Any other firewall target, typically a jump to another chain.
    Jump,
    Sensing,
    Active,
    Cycle,
    Unresolved,
}

impl Status {
    /// Maps a boolean condition to [`Status::Enabled`] or [`Status::Disabled`].
    pub fn enabled(flag: bool) -> Self {
        if flag { Self::Enabled } else { Self::Disabled }
    }

    /// Classifies a TR-181 boolean value; `1` and `true` are enabled, anything else is not.
    pub fn from_flag(value: Option<&str>) -> Self {
        Self::enabled(value.is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true")))
    }

    /// Classifies a firewall rule target such as `Accept`, `Drop` or `Reject`.
    pub fn from_target(target: &str) -> Self {
        match target.trim().to_ascii_lowercase().as_str() {
            "accept" => Self::Accept,
            "drop" => Self::Drop,
            "reject" => Self::Reject,
            _ => Self::Jump,
        }
    }
}

/// The glyph table used to render a [`Status`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSet {
    /// Colored emoji indicators.
    #[default]
    Emoji,
    /// Single ASCII characters, for terminals without emoji fonts.
    Ascii,
}

impl GlyphSet {
    /// Looks up the glyph for `status`.
    pub fn glyph(self, status: Status) -> &'static str {
        match self {
            Self::Emoji => match status {
                Status::Enabled => "🟢",
                Status::Disabled => "🔴",
                Status::Accept => "✅",
                Status::Drop => "🚫",
                Status::Reject => "❌",
                Status::Jump => "➡️",
                Status::Sensing => "📡",
                Status::Active => "★",
                Status::Cycle => "🔁",
                Status::Unresolved => "❓",
            },
            Self::Ascii => match status {
                Status::Enabled => "+",
                Status::Disabled => "-",
                Status::Accept => "A",
                Status::Drop => "D",
                Status::Reject => "R",
                Status::Jump => ">",
                Status::Sensing => "~",
                Status::Active => "*",
                Status::Cycle => "@",
                Status::Unresolved => "?",
            },
        }
    }
}
