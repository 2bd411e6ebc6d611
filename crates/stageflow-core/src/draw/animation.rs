//! SMIL animation builders.
//!
//! The renderer animates two effects:
//!
//! - **Draw**: a stroke is revealed from 0% to 100% of its length by
//!   animating `stroke-dashoffset` from the length down to zero.
//! - **Fade-in**: a node group animates `opacity` from 0 to 1 while scaling
//!   from [`FADE_IN_START_SCALE`] to 1 around its own origin.
//!
//! Every animation freezes on its final frame; nothing animates out.
//!
//! ```
//! # use stageflow_core::draw::{Easing, animation};
//! let draw = animation::draw(120.0, 0.75, 1.2, Easing::EaseInOut);
//! let rendered = draw.to_string();
//! assert!(rendered.contains("begin=\"750ms\""));
//! assert!(rendered.contains("dur=\"1200ms\""));
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;
use svg::node::element::{Animate, AnimateTransform};

/// Scale a node starts from before it fades in.
pub const FADE_IN_START_SCALE: f32 = 0.8;

/// Timing curve of an animation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Slow start
    EaseIn,
    /// Slow finish
    EaseOut,
    /// Slow start and finish
    #[default]
    EaseInOut,
}

impl Easing {
    /// Returns the cubic-bezier control points used as SMIL `keySplines`,
    /// or `None` for linear timing.
    pub fn key_splines(self) -> Option<&'static str> {
        match self {
            Self::Linear => None,
            Self::EaseIn => Some("0.42 0 1 1"),
            Self::EaseOut => Some("0 0 0.58 1"),
            Self::EaseInOut => Some("0.42 0 0.58 1"),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }
}

impl FromStr for Easing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "ease-in" => Ok(Self::EaseIn),
            "ease-out" => Ok(Self::EaseOut),
            "ease-in-out" => Ok(Self::EaseInOut),
            _ => Err(format!(
                "invalid easing `{s}`, valid values: linear, ease-in, ease-out, ease-in-out"
            )),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Formats seconds as a SMIL clock value in whole milliseconds.
///
/// Negative and non-finite inputs clamp to `0ms`.
pub fn clock_value(seconds: f32) -> String {
    let millis = if seconds.is_finite() {
        (seconds * 1000.0).round().max(0.0)
    } else {
        0.0
    };
    format!("{millis}ms")
}

/// Builds the animation that reveals a stroke of `length` pixels.
///
/// The animated element must carry `stroke-dasharray` and
/// `stroke-dashoffset` both equal to `length`.
pub fn draw(length: f32, delay: f32, duration: f32, easing: Easing) -> Animate {
    let animate = Animate::new()
        .set("attributeName", "stroke-dashoffset")
        .set("from", length)
        .set("to", 0)
        .set("begin", clock_value(delay))
        .set("dur", clock_value(duration))
        .set("fill", "freeze");
    apply_easing(animate, easing)
}

/// Builds the opacity half of a node fade-in.
pub fn fade_in(delay: f32, duration: f32, easing: Easing) -> Animate {
    let animate = Animate::new()
        .set("attributeName", "opacity")
        .set("from", 0)
        .set("to", 1)
        .set("begin", clock_value(delay))
        .set("dur", clock_value(duration))
        .set("fill", "freeze");
    apply_easing(animate, easing)
}

/// Builds the scale half of a node fade-in.
pub fn scale_in(delay: f32, duration: f32, easing: Easing) -> AnimateTransform {
    let transform = AnimateTransform::new()
        .set("attributeName", "transform")
        .set("type", "scale")
        .set("from", FADE_IN_START_SCALE)
        .set("to", 1)
        .set("begin", clock_value(delay))
        .set("dur", clock_value(duration))
        .set("fill", "freeze");
    match easing.key_splines() {
        Some(splines) => transform
            .set("calcMode", "spline")
            .set("keyTimes", "0;1")
            .set("keySplines", splines),
        None => transform,
    }
}

fn apply_easing(animate: Animate, easing: Easing) -> Animate {
    match easing.key_splines() {
        Some(splines) => animate
            .set("calcMode", "spline")
            .set("keyTimes", "0;1")
            .set("keySplines", splines),
        None => animate,
    }
}
