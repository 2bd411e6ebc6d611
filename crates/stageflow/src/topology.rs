//! The fixed four-stage topology of the flow diagram.
//!
//! The diagram always has exactly four nodes, identified by [`NodeKey`] in
//! narrative order: Agent, Processing, Analysing, Report. Each node is
//! described by a [`NodeSpec`] (label, icon, anchor and pixel offset), and
//! [`NodeSpecs`] holds the validated set with one spec per key.
//!
//! Two built-in [`DiagramVariant`]s provide the default specs:
//!
//! ```text
//! Standard                          Wide
//! ┌───────────────────────┐         ┌───────────────────────┐
//! │          [P]          │         │                  [P]  │
//! │ [A]      [An]         │         │ [A]              [An] │
//! │          [R]          │         │                  [R]  │
//! └───────────────────────┘         └───────────────────────┘
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

use stageflow_core::{
    anchor::Anchor,
    geometry::{Point, Size},
};

use crate::StageflowError;

/// Rendered width and height of every node icon, in pixels.
///
/// The corrective offsets of the leg table are aligned to this size.
pub const ICON_SIZE: f32 = 36.0;

/// Returns the canonical icon size as a [`Size`].
pub fn icon_size() -> Size {
    Size::new(ICON_SIZE, ICON_SIZE)
}

/// Identity of one of the four diagram stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKey {
    /// Source of the flow, on the left of the diagram
    Agent,
    /// First stage of the column
    Processing,
    /// Middle stage of the column
    Analysing,
    /// Final stage of the column
    Report,
}

impl NodeKey {
    /// All node keys in narrative order.
    pub const ALL: [NodeKey; 4] = [
        Self::Agent,
        Self::Processing,
        Self::Analysing,
        Self::Report,
    ];

    /// Position of this key in [`NodeKey::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Agent => 0,
            Self::Processing => 1,
            Self::Analysing => 2,
            Self::Report => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Processing => "processing",
            Self::Analysing => "analysing",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| {
                format!("invalid node `{s}`, valid values: agent, processing, analysing, report")
            })
    }
}

/// Opaque reference to a node icon, handed to an icon provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct IconRef(String);

impl IconRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IconRef {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static description of one diagram node.
///
/// The resolved centre of a node is its anchor resolved against the
/// container, plus its offset.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    key: NodeKey,
    label: String,
    icon: IconRef,
    anchor: Anchor,
    offset: Point,
}

impl NodeSpec {
    /// Creates a spec with a zero offset.
    pub fn new(key: NodeKey, label: impl Into<String>, icon: IconRef, anchor: Anchor) -> Self {
        Self {
            key,
            label: label.into(),
            icon,
            anchor,
            offset: Point::default(),
        }
    }

    pub fn with_offset(mut self, dx: f32, dy: f32) -> Self {
        self.offset = Point::new(dx, dy);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_icon(mut self, icon: IconRef) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> &IconRef {
        &self.icon
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn offset(&self) -> Point {
        self.offset
    }
}

/// The validated node specs of a diagram: exactly one per [`NodeKey`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpecs {
    // Indexed by `NodeKey::index`
    specs: Vec<NodeSpec>,
}

impl NodeSpecs {
    /// Builds the spec set from an arbitrary list of specs.
    ///
    /// # Errors
    ///
    /// Returns [`StageflowError::Topology`] if a key appears twice or a key
    /// has no spec.
    pub fn from_specs(specs: impl IntoIterator<Item = NodeSpec>) -> Result<Self, StageflowError> {
        let mut slots: [Option<NodeSpec>; 4] = Default::default();

        for spec in specs {
            let slot = &mut slots[spec.key().index()];
            if slot.is_some() {
                return Err(StageflowError::Topology(format!(
                    "duplicate spec for node `{}`",
                    spec.key()
                )));
            }
            *slot = Some(spec);
        }

        let specs = slots
            .into_iter()
            .zip(NodeKey::ALL)
            .map(|(slot, key)| {
                slot.ok_or_else(|| {
                    StageflowError::Topology(format!("missing spec for node `{key}`"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { specs })
    }

    /// Returns the built-in specs of a variant.
    pub fn for_variant(variant: DiagramVariant) -> Self {
        let specs = match variant {
            DiagramVariant::Standard => vec![
                NodeSpec::new(
                    NodeKey::Agent,
                    "Agent Started",
                    IconRef::from("icons/agent.svg"),
                    Anchor::CenterLeft,
                )
                .with_offset(140.0, 0.0),
                NodeSpec::new(
                    NodeKey::Processing,
                    "Processing",
                    IconRef::from("icons/processing.svg"),
                    Anchor::TopCenter,
                )
                .with_offset(0.0, 110.0),
                NodeSpec::new(
                    NodeKey::Analysing,
                    "Analysing",
                    IconRef::from("icons/analysing.svg"),
                    Anchor::Center,
                ),
                NodeSpec::new(
                    NodeKey::Report,
                    "Report",
                    IconRef::from("icons/report.svg"),
                    Anchor::BottomCenter,
                )
                .with_offset(0.0, -110.0),
            ],
            DiagramVariant::Wide => vec![
                NodeSpec::new(
                    NodeKey::Agent,
                    "Agent Started",
                    IconRef::from("icons/wide/agent.svg"),
                    Anchor::CenterLeft,
                )
                .with_offset(140.0, 0.0),
                NodeSpec::new(
                    NodeKey::Processing,
                    "Processing",
                    IconRef::from("icons/wide/processing.svg"),
                    Anchor::TopRight,
                )
                .with_offset(-140.0, 110.0),
                NodeSpec::new(
                    NodeKey::Analysing,
                    "Analysing",
                    IconRef::from("icons/wide/analysing.svg"),
                    Anchor::CenterRight,
                )
                .with_offset(-140.0, 0.0),
                NodeSpec::new(
                    NodeKey::Report,
                    "Report",
                    IconRef::from("icons/wide/report.svg"),
                    Anchor::BottomRight,
                )
                .with_offset(-140.0, -110.0),
            ],
        };

        Self { specs }
    }

    /// Returns the spec of `key`.
    pub fn get(&self, key: NodeKey) -> &NodeSpec {
        &self.specs[key.index()]
    }

    /// Iterates the specs in narrative order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeSpec> {
        self.specs.iter()
    }
}

impl Default for NodeSpecs {
    fn default() -> Self {
        Self::for_variant(DiagramVariant::default())
    }
}

impl IntoIterator for NodeSpecs {
    type Item = NodeSpec;
    type IntoIter = std::vec::IntoIter<NodeSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.into_iter()
    }
}

/// Built-in diagram definition.
///
/// A variant selects the default node specs and the leg offset table; the
/// layout, segment and timeline code is shared.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramVariant {
    /// Stage column centred in the container
    #[default]
    Standard,
    /// Stage column near the right edge of the container
    Wide,
}

impl DiagramVariant {
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Wide => "wide",
        }
    }
}

impl fmt::Display for DiagramVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiagramVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "wide" => Ok(Self::Wide),
            _ => Err(format!("invalid variant `{s}`, valid values: standard, wide")),
        }
    }
}
