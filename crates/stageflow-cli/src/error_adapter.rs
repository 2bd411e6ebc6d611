//! Error adapter for converting StageflowError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use stageflow::StageflowError;

/// Adapter giving a [`StageflowError`] a stable diagnostic code and, where
/// one exists, a hint on how to fix it.
pub struct ErrorAdapter<'a>(pub &'a StageflowError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            StageflowError::Io(_) => "stageflow::io",
            StageflowError::Config(_) => "stageflow::config",
            StageflowError::Topology(_) => "stageflow::topology",
            StageflowError::Export(_) => "stageflow::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            StageflowError::Config(_) => {
                "check the configuration file, or pass --config to choose another one"
            }
            StageflowError::Topology(_) => "every node may be listed at most once",
            StageflowError::Io(_) | StageflowError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wrap `err` for rendering with miette.
pub fn to_reportable(err: &StageflowError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
