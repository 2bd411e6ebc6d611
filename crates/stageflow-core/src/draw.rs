//! Drawing primitives for animated SVG output.
//!
//! - [`StrokeDefinition`] describes how connector legs are stroked
//! - [`LayeredOutput`] collects SVG nodes per [`RenderLayer`] for z-ordering
//! - [`Easing`] and the builders in [`animation`] produce SMIL animation elements

pub mod animation;

mod layer;
mod stroke;

pub use animation::Easing;
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeCap, StrokeDefinition};
