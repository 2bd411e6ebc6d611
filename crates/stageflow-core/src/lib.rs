//! Stageflow Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Stageflow
//! diagram engine. It includes:
//!
//! - **Geometry**: Points, sizes and the measured container ([`geometry`] module)
//! - **Anchors**: Symbolic container positions and their resolution ([`anchor`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Draw**: Stroke, layer and animation primitives for SVG output ([`draw`] module)

pub mod anchor;
pub mod color;
pub mod draw;
pub mod geometry;
