//! Error types for dmviz operations.
//!
//! This module provides the main error type [`DmvizError`]. Only a missing
//! or unreadable input is fatal to a run; absent attributes, unresolvable
//! references and reference cycles are rendered as markers instead.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for dmviz operations.
#[derive(Debug, Error)]
pub enum DmvizError {
    #[error("input file not found: {}", .path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown visualizer `{name}`")]
    UnknownVisualizer {
        name: String,
        available: Vec<&'static str>,
    },

    #[error("ambiguous visualizer `{name}`: matches {}", .candidates.join(", "))]
    AmbiguousVisualizer {
        name: String,
        candidates: Vec<&'static str>,
    },
}

impl DmvizError {
    /// Returns `true` for errors caused by how the tool was invoked rather than by its input.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::UnknownVisualizer { .. } | Self::AmbiguousVisualizer { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = DmvizError::InputNotFound {
            path: PathBuf::from("DM.txt"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(err.to_string(), "input file not found: DM.txt");

        let err = DmvizError::AmbiguousVisualizer {
            name: "show_f".to_string(),
            candidates: vec!["show_firewall_policies", "show_firewall_rules"],
        };
        assert_eq!(
            err.to_string(),
            "ambiguous visualizer `show_f`: matches show_firewall_policies, show_firewall_rules"
        );
        assert!(err.is_usage());
    }
}
