//! Configuration types for Stageflow diagrams.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as a TOML file. Every section is optional; an empty
//! document yields [`AppConfig::default`].
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`StyleConfig`] - Colors, stroke, label font and animation easing.
//! - [`NodeOverride`] - Per-node replacement of label, icon, anchor or offset.
//!
//! # Example
//!
//! ```toml
//! variant = "wide"
//!
//! [container]
//! width = 1280
//! height = 720
//!
//! [timing]
//! segment_draw = 0.8
//!
//! [style]
//! stroke_color = "#64748b"
//! easing = "ease-out"
//!
//! [[nodes]]
//! key = "report"
//! label = "Summary"
//! anchor = "bottom-center-right"
//! offset = [0, -90]
//! ```

use std::collections::HashSet;

use serde::Deserialize;

use stageflow_core::{
    anchor::Anchor,
    color::Color,
    draw::{Easing, StrokeCap, StrokeDefinition},
    geometry::ContainerSize,
};

use crate::{
    StageflowError,
    timeline::TimingConstants,
    topology::{DiagramVariant, IconRef, NodeKey, NodeSpec, NodeSpecs},
};

const DEFAULT_STROKE_COLOR: &str = "#94a3b8";
const DEFAULT_STROKE_WIDTH: f32 = 2.0;
const DEFAULT_LABEL_COLOR: &str = "#334155";
const DEFAULT_FONT_FAMILY: &str = "sans-serif";
const DEFAULT_FONT_SIZE: f32 = 13.0;

/// Top-level diagram configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Built-in diagram definition to start from.
    #[serde(default)]
    variant: DiagramVariant,

    /// Container size used when rendering without a host.
    #[serde(default)]
    container: ContainerSize,

    #[serde(default)]
    timing: TimingConstants,

    #[serde(default)]
    style: StyleConfig,

    /// Overrides applied on top of the variant's node specs.
    #[serde(default)]
    nodes: Vec<NodeOverride>,
}

impl AppConfig {
    pub fn variant(&self) -> DiagramVariant {
        self.variant
    }

    pub fn container(&self) -> ContainerSize {
        self.container
    }

    pub fn timing(&self) -> &TimingConstants {
        &self.timing
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn nodes(&self) -> &[NodeOverride] {
        &self.nodes
    }

    pub fn with_variant(mut self, variant: DiagramVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_container(mut self, container: ContainerSize) -> Self {
        self.container = container;
        self
    }

    pub fn with_timing(mut self, timing: TimingConstants) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_node_override(mut self, node: NodeOverride) -> Self {
        self.nodes.push(node);
        self
    }

    /// Builds the node specs: the variant defaults with overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`StageflowError::Config`] if a node is overridden twice.
    pub fn node_specs(&self) -> Result<NodeSpecs, StageflowError> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.key()) {
                return Err(StageflowError::Config(format!(
                    "node `{}` is overridden more than once",
                    node.key()
                )));
            }
        }

        let specs = NodeSpecs::for_variant(self.variant)
            .into_iter()
            .map(|spec| match self.nodes.iter().find(|node| node.key() == spec.key()) {
                Some(node) => node.apply(spec),
                None => spec,
            });

        NodeSpecs::from_specs(specs)
    }

    /// Checks every value that is not validated during deserialization.
    ///
    /// # Errors
    ///
    /// Returns [`StageflowError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), StageflowError> {
        self.timing.validate().map_err(StageflowError::Config)?;
        self.style.validate().map_err(StageflowError::Config)?;
        self.node_specs()?;
        Ok(())
    }
}

/// Visual styling of the rendered diagram.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background fill; transparent when unset.
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    stroke_color: Option<String>,

    #[serde(default)]
    stroke_width: Option<f32>,

    /// Line cap of connector legs (`butt`, `round`, `square`); round when unset.
    #[serde(default)]
    stroke_cap: Option<String>,

    #[serde(default)]
    label_color: Option<String>,

    #[serde(default)]
    font_family: Option<String>,

    #[serde(default)]
    font_size: Option<f32>,

    /// Timing curve of every animation.
    #[serde(default)]
    easing: Easing,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the stroke used for connector legs.
    ///
    /// # Errors
    ///
    /// Returns an error if the stroke color or cap cannot be parsed, or the
    /// width is not a positive number.
    pub fn stroke(&self) -> Result<StrokeDefinition, String> {
        let color = Color::new(self.stroke_color.as_deref().unwrap_or(DEFAULT_STROKE_COLOR))
            .map_err(|err| format!("Invalid stroke color in config: {err}"))?;

        let width = self.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH);
        if !width.is_finite() || width <= 0.0 {
            return Err(format!(
                "Invalid stroke width in config: expected a positive number, got {width}"
            ));
        }

        let cap = match &self.stroke_cap {
            Some(cap) => cap
                .parse::<StrokeCap>()
                .map_err(|err| format!("Invalid stroke cap in config: {err}"))?,
            None => StrokeCap::Round,
        };

        let mut stroke = StrokeDefinition::new(color, width);
        stroke.set_cap(cap);
        Ok(stroke)
    }

    /// Returns the label text [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn label_color(&self) -> Result<Color, String> {
        Color::new(self.label_color.as_deref().unwrap_or(DEFAULT_LABEL_COLOR))
            .map_err(|err| format!("Invalid label color in config: {err}"))
    }

    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }

    pub fn font_size(&self) -> f32 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    fn validate(&self) -> Result<(), String> {
        self.background_color()?;
        self.stroke()?;
        self.label_color()?;

        let font_size = self.font_size();
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(format!(
                "Invalid font size in config: expected a positive number, got {font_size}"
            ));
        }
        Ok(())
    }
}

/// Replacement values for one node of the selected variant.
///
/// Unknown anchor tags are accepted and resolve to the container centre.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeOverride {
    key: NodeKey,

    #[serde(default)]
    label: Option<String>,

    #[serde(default)]
    icon: Option<IconRef>,

    #[serde(default)]
    anchor: Option<Anchor>,

    /// Pixel offset as `[dx, dy]`.
    #[serde(default)]
    offset: Option<(f32, f32)>,
}

impl NodeOverride {
    /// Creates an override of `key` that changes nothing yet.
    pub fn new(key: NodeKey) -> Self {
        Self {
            key,
            label: None,
            icon: None,
            anchor: None,
            offset: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_icon(mut self, icon: IconRef) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn with_offset(mut self, dx: f32, dy: f32) -> Self {
        self.offset = Some((dx, dy));
        self
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// Applies the set fields to `spec`.
    pub fn apply(&self, mut spec: NodeSpec) -> NodeSpec {
        if let Some(label) = &self.label {
            spec = spec.with_label(label.clone());
        }
        if let Some(icon) = &self.icon {
            spec = spec.with_icon(icon.clone());
        }
        if let Some(anchor) = self.anchor {
            spec = spec.with_anchor(anchor);
        }
        if let Some((dx, dy)) = self.offset {
            spec = spec.with_offset(dx, dy);
        }
        spec
    }
}

#[cfg(test)]
mod tests {
    use stageflow_core::geometry::Point;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.variant(), DiagramVariant::Standard);
        assert_eq!(config.container(), ContainerSize::default());
        assert_eq!(config.timing(), &TimingConstants::default());
        assert!(config.nodes().is_empty());
        assert!(config.validate().is_ok());
        assert_eq!(config.node_specs().unwrap(), NodeSpecs::default());
    }

    #[test]
    fn test_default_style() {
        let style = StyleConfig::default();

        assert_eq!(style.background_color(), Ok(None));
        assert_eq!(style.stroke().unwrap().width(), 2.0);
        assert_eq!(style.stroke().unwrap().cap(), StrokeCap::Round);
        assert!(style.label_color().is_ok());
        assert_eq!(style.font_family(), "sans-serif");
        assert_eq!(style.font_size(), 13.0);
        assert_eq!(style.easing(), Easing::EaseInOut);
    }

    #[test]
    fn test_override_applies_set_fields_only() {
        let config = AppConfig::default().with_node_override(
            NodeOverride::new(NodeKey::Report)
                .with_label("Summary")
                .with_anchor(Anchor::BottomCenterRight)
                .with_offset(0.0, -90.0),
        );

        let specs = config.node_specs().unwrap();
        let report = specs.get(NodeKey::Report);
        assert_eq!(report.label(), "Summary");
        assert_eq!(report.anchor(), Anchor::BottomCenterRight);
        assert_eq!(report.offset(), Point::new(0.0, -90.0));
        assert_eq!(report.icon().as_str(), "icons/report.svg");

        assert_eq!(
            specs.get(NodeKey::Agent),
            NodeSpecs::default().get(NodeKey::Agent)
        );
    }

    #[test]
    fn test_duplicate_override_rejected() {
        let config = AppConfig::default()
            .with_node_override(NodeOverride::new(NodeKey::Agent).with_label("A"))
            .with_node_override(NodeOverride::new(NodeKey::Agent).with_label("B"));

        let err = config.node_specs().unwrap_err();
        assert!(matches!(err, StageflowError::Config(_)));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_style_rejected() {
        let config: AppConfig = toml::from_str(
            r##"
            [style]
            stroke_color = "not-a-color"
            "##,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid stroke color"));
    }

    #[test]
    fn test_stroke_cap_from_style() {
        let config: AppConfig = toml::from_str(
            r##"
            [style]
            stroke_cap = "square"
            "##,
        )
        .unwrap();
        assert_eq!(config.style().stroke().unwrap().cap(), StrokeCap::Square);

        let config: AppConfig = toml::from_str(
            r##"
            [style]
            stroke_cap = "mitre"
            "##,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid stroke cap"));
    }

    #[test]
    fn test_invalid_timing_rejected() {
        let config = AppConfig::default().with_timing(TimingConstants::new(0.6, 1.2, -0.1, 0.05));
        assert!(config.validate().unwrap_err().to_string().contains("gap"));
    }

    #[test]
    fn test_deserialize_full_config() {
        let config: AppConfig = toml::from_str(
            r##"
            variant = "wide"

            [container]
            width = 1280
            height = 720

            [timing]
            segment_draw = 0.8

            [style]
            background_color = "#f8fafc"
            stroke_width = 3
            easing = "linear"

            [[nodes]]
            key = "processing"
            icon = "custom/processing.png"
            anchor = "somewhere"
            "##,
        )
        .unwrap();

        assert_eq!(config.variant(), DiagramVariant::Wide);
        assert_eq!(config.container(), ContainerSize::new(1280.0, 720.0));
        assert_eq!(config.timing().segment_draw(), 0.8);
        assert_eq!(config.timing().node_fade(), 0.6);
        assert!(config.style().background_color().unwrap().is_some());
        assert_eq!(config.style().stroke().unwrap().width(), 3.0);
        assert_eq!(config.style().easing(), Easing::Linear);

        let specs = config.node_specs().unwrap();
        let processing = specs.get(NodeKey::Processing);
        assert_eq!(processing.icon().as_str(), "custom/processing.png");
        assert_eq!(processing.anchor(), Anchor::Center);
        assert_eq!(processing.offset(), Point::new(-140.0, 110.0));
    }

    #[test]
    fn test_deserialize_empty_config() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.variant(), DiagramVariant::Standard);
        assert_eq!(config.container(), ContainerSize::default());
    }
}
