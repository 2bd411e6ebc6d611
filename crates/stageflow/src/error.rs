//! Error types for Stageflow operations.
//!
//! This module provides the main error type [`StageflowError`]. Most failure
//! modes of the diagram are recovered locally (unknown anchors fall back to
//! the container centre, missing icons render as placeholders, degenerate
//! containers produce a collapsed layout), so the variants here only cover
//! what a caller can actually act on.

use std::io;

use thiserror::Error;

/// The main error type for Stageflow operations.
#[derive(Debug, Error)]
pub enum StageflowError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Topology error: {0}")]
    Topology(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for StageflowError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StageflowError::Topology("missing node `report`".to_string());
        assert_eq!(err.to_string(), "Topology error: missing node `report`");

        let err = StageflowError::Config("bad color".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad color");
    }

    #[test]
    fn test_export_error_conversion() {
        let err: StageflowError = crate::export::Error::Render("empty".to_string()).into();
        assert!(matches!(err, StageflowError::Export(_)));
        assert_eq!(err.to_string(), "Export error: Render error: empty");
    }
}
