//! Wide/compact layout selection and the narrow terminal advisory.

/// Terminals at least this wide use [`Layout::Wide`].
pub const WIDE_THRESHOLD: usize = 90;

/// Width below which [`narrow_width_warning`] produces an advisory.
pub const RECOMMENDED_WIDTH: usize = 80;

/// Width assumed when the terminal size cannot be detected.
pub const FALLBACK_WIDTH: usize = 80;

/// The two rendering modes selected by terminal width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Aligned multi-column tables.
    Wide,
    /// Stacked multi-line cards, one per row.
    Compact,
}

impl Layout {
    /// Selects a layout for `width` using a custom threshold.
    pub fn select(width: usize, wide_threshold: usize) -> Self {
        if width >= wide_threshold {
            Self::Wide
        } else {
            Self::Compact
        }
    }

    /// Returns `true` for [`Layout::Wide`].
    pub fn is_wide(self) -> bool {
        matches!(self, Self::Wide)
    }
}

/// Selects a layout for `width` using [`WIDE_THRESHOLD`].
pub fn select_layout(width: usize) -> Layout {
    Layout::select(width, WIDE_THRESHOLD)
}

/// Returns the advisory for terminals narrower than `recommended`, if any.
///
/// The caller writes it to the error stream; rendering continues regardless.
pub fn narrow_width_warning(width: usize, recommended: usize) -> Option<String> {
    (width < recommended).then(|| {
        format!("⚠ Warning: terminal width is {width} cols; recommended >= {recommended} cols.")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_layout_threshold_is_exact() {
        assert_eq!(select_layout(89), Layout::Compact);
        assert_eq!(select_layout(90), Layout::Wide);
        assert_eq!(select_layout(0), Layout::Compact);
        assert_eq!(select_layout(200), Layout::Wide);
    }

    #[test]
    fn test_select_custom_threshold() {
        assert_eq!(Layout::select(60, 60), Layout::Wide);
        assert_eq!(Layout::select(59, 60), Layout::Compact);
    }

    #[test]
    fn test_narrow_width_warning() {
        assert_eq!(narrow_width_warning(80, RECOMMENDED_WIDTH), None);
        assert_eq!(
            narrow_width_warning(72, RECOMMENDED_WIDTH).as_deref(),
            Some("⚠ Warning: terminal width is 72 cols; recommended >= 80 cols.")
        );
    }
}
