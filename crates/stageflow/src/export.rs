//! Export functionality for Stageflow diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning computed geometry and a timeline into an output format. It is the
//! final stage of the pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! ContainerSize
//!     ↓ anchor resolution + offsets
//! NodeLayout
//!     ↓ leg table
//! SegmentSet          TimingConstants
//!     ↓                   ↓ schedule
//!     └──── export (this module) ────┘
//! Animated document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: animated SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`StageflowError::Export`] at the crate boundary.
//!
//! [`StageflowError::Export`]: crate::StageflowError::Export

/// SVG export backend.
pub mod svg;

use crate::{layout::DiagramGeometry, timeline::Timeline};

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Renders the geometry, animated according to `timeline`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be converted to the
    /// target format.
    fn export_diagram(
        &self,
        geometry: &DiagramGeometry,
        timeline: &Timeline,
    ) -> Result<String, Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
