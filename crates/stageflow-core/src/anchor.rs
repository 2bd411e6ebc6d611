//! Symbolic anchors and their resolution against a container.
//!
//! An [`Anchor`] names a fractional point inside the rendering container.
//! Thirteen anchors are recognised: the top and bottom rows support five
//! horizontal positions, the middle row supports three.
//!
//! | Row    | Horizontal positions                                      |
//! |--------|-----------------------------------------------------------|
//! | top    | left, center-left, center, center-right, right            |
//! | center | left, center, right                                       |
//! | bottom | left, center-left, center, center-right, right            |
//!
//! Horizontal fractions are `0`, `0.33`, `0.5`, `0.67` and `1.0` of the
//! width; vertical fractions are `0`, `0.5` and `1.0` of the height.
//!
//! # Example
//!
//! ```
//! # use stageflow_core::anchor::Anchor;
//! # use stageflow_core::geometry::{ContainerSize, Point};
//! let size = ContainerSize::new(920.0, 560.0);
//!
//! assert_eq!(Anchor::TopCenter.resolve(size), Point::new(460.0, 0.0));
//! assert_eq!(Anchor::from_tag("bottom-right").resolve(size), Point::new(920.0, 560.0));
//!
//! // Unknown tags collapse to the container centre.
//! assert_eq!(Anchor::from_tag("upper-middle").resolve(size), Point::new(460.0, 280.0));
//! ```

use std::{fmt, str::FromStr};

use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{ContainerSize, Point};

/// Horizontal fraction of the `center-left` column.
const CENTER_LEFT_FRACTION: f32 = 0.33;
/// Horizontal fraction of the `center-right` column.
const CENTER_RIGHT_FRACTION: f32 = 0.67;

/// Error returned by strict anchor parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown anchor `{0}`, expected one of: {list}", list = Anchor::tag_list())]
pub struct UnknownAnchor(pub String);

/// One of the thirteen recognised container anchors.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Anchor {
    /// `top-left`: `(0, 0)`
    TopLeft,
    /// `top-center-left`: `(0.33, 0)`
    TopCenterLeft,
    /// `top-center`: `(0.5, 0)`
    TopCenter,
    /// `top-center-right`: `(0.67, 0)`
    TopCenterRight,
    /// `top-right`: `(1, 0)`
    TopRight,
    /// `center-left`: `(0, 0.5)`
    CenterLeft,
    /// `center`: `(0.5, 0.5)`, also the fallback for unknown tags
    #[default]
    Center,
    /// `center-right`: `(1, 0.5)`
    CenterRight,
    /// `bottom-left`: `(0, 1)`
    BottomLeft,
    /// `bottom-center-left`: `(0.33, 1)`
    BottomCenterLeft,
    /// `bottom-center`: `(0.5, 1)`
    BottomCenter,
    /// `bottom-center-right`: `(0.67, 1)`
    BottomCenterRight,
    /// `bottom-right`: `(1, 1)`
    BottomRight,
}

impl Anchor {
    /// All recognised anchors, in row-major order.
    pub const ALL: [Anchor; 13] = [
        Self::TopLeft,
        Self::TopCenterLeft,
        Self::TopCenter,
        Self::TopCenterRight,
        Self::TopRight,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::BottomLeft,
        Self::BottomCenterLeft,
        Self::BottomCenter,
        Self::BottomCenterRight,
        Self::BottomRight,
    ];

    /// Returns the tag this anchor is written as.
    pub fn tag(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenterLeft => "top-center-left",
            Self::TopCenter => "top-center",
            Self::TopCenterRight => "top-center-right",
            Self::TopRight => "top-right",
            Self::CenterLeft => "center-left",
            Self::Center => "center",
            Self::CenterRight => "center-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenterLeft => "bottom-center-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomCenterRight => "bottom-center-right",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Lenient conversion from a tag.
    ///
    /// Unrecognised tags resolve to [`Anchor::Center`]; the fallback is
    /// logged and never reported as an error.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|err: UnknownAnchor| {
            warn!(tag = err.0.as_str(); "Unknown anchor, falling back to container center");
            Self::Center
        })
    }

    /// Returns the `(horizontal, vertical)` fractions of this anchor.
    pub fn fractions(self) -> (f32, f32) {
        match self {
            Self::TopLeft => (0.0, 0.0),
            Self::TopCenterLeft => (CENTER_LEFT_FRACTION, 0.0),
            Self::TopCenter => (0.5, 0.0),
            Self::TopCenterRight => (CENTER_RIGHT_FRACTION, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::CenterLeft => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::CenterRight => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::BottomCenterLeft => (CENTER_LEFT_FRACTION, 1.0),
            Self::BottomCenter => (0.5, 1.0),
            Self::BottomCenterRight => (CENTER_RIGHT_FRACTION, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }

    /// Resolves this anchor to an absolute point inside `size`.
    pub fn resolve(self, size: ContainerSize) -> Point {
        let (fx, fy) = self.fractions();
        Point::new(size.width() * fx, size.height() * fy)
    }

    fn tag_list() -> String {
        Self::ALL
            .iter()
            .map(|anchor| anchor.tag())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Resolves a raw tag against `size`, falling back to the container centre.
pub fn resolve_tag(tag: &str, size: ContainerSize) -> Point {
    Anchor::from_tag(tag).resolve(size)
}

impl FromStr for Anchor {
    type Err = UnknownAnchor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|anchor| anchor.tag() == normalized)
            .ok_or_else(|| UnknownAnchor(s.to_string()))
    }
}

impl From<String> for Anchor {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
