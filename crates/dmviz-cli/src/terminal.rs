//! Terminal width detection.

use std::{env, io};

use crossterm::terminal;
use log::debug;

/// Environment variable that overrides the detected terminal width.
const COLUMNS: &str = "COLUMNS";

/// Returns the terminal width in columns.
///
/// A positive integer in `COLUMNS` wins over the size reported by the
/// terminal. Without either, e.g. when output is piped, `fallback` is used.
pub fn detect_width(fallback: usize) -> usize {
    let columns = env::var(COLUMNS).ok();
    resolve_width(columns.as_deref(), terminal::size(), fallback)
}

fn resolve_width(columns: Option<&str>, size: io::Result<(u16, u16)>, fallback: usize) -> usize {
    if let Some(width) = columns
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|width| *width > 0)
    {
        debug!(width; "Terminal width taken from COLUMNS");
        return width;
    }

    match size {
        Ok((columns, _)) if columns > 0 => usize::from(columns),
        Ok(_) => fallback,
        Err(err) => {
            debug!(err:?, fallback; "Terminal size unavailable");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_overrides_terminal_size() {
        assert_eq!(resolve_width(Some("120"), Ok((100, 40)), 80), 120);
        assert_eq!(resolve_width(Some(" 95 "), Err(io::Error::other("not a tty")), 80), 95);
    }

    #[test]
    fn test_invalid_columns_is_ignored() {
        for columns in ["", "0", "-3", "wide"] {
            assert_eq!(resolve_width(Some(columns), Ok((100, 40)), 80), 100, "{columns:?}");
        }
    }

    #[test]
    fn test_fallback_without_terminal() {
        assert_eq!(resolve_width(None, Ok((100, 40)), 80), 100);
        assert_eq!(resolve_width(None, Ok((0, 0)), 72), 72);
        assert_eq!(resolve_width(None, Err(io::Error::other("not a tty")), 72), 72);
    }
}
