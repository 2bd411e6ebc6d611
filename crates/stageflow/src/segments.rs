//! Segment geometry: straight connector legs between resolved nodes.
//!
//! The diagram has seven fixed legs, two of which pair up into "L" shaped
//! connectors:
//!
//! ```text
//!          ┌──────────► [Processing]
//!          │                 │
//!          │                 ▼
//!      [Agent] ────────► [Analysing]
//!          │                 │
//!          │                 ▼
//!          └──────────► [Report]
//! ```
//!
//! Each leg endpoint coordinate is a node centre axis plus a literal
//! corrective offset, so lines touch the edge of the 36×36 icon instead of
//! its centre. The offsets live in a per-variant [`LegTable`]; nothing is
//! derived from icon geometry at runtime.

use std::fmt;

use log::trace;

use stageflow_core::geometry::Point;

use crate::{
    layout::NodeLayout,
    topology::{DiagramVariant, NodeKey},
};

/// Identity of one straight leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentKey {
    /// Rises from the agent toward the processing row
    AgentProcessingVertical,
    /// Runs along the processing row into the processing node
    AgentProcessingHorizontal,
    /// Descends the column from processing to analysing
    ProcessingAnalysing,
    /// Runs straight from the agent into analysing
    AgentAnalysing,
    /// Descends the column from analysing to report
    AnalysingReport,
    /// Drops from the agent toward the report row
    AgentReportVertical,
    /// Runs along the report row into the report node
    AgentReportHorizontal,
}

impl SegmentKey {
    /// All legs in table order.
    pub const ALL: [SegmentKey; 7] = [
        Self::AgentProcessingVertical,
        Self::AgentProcessingHorizontal,
        Self::ProcessingAnalysing,
        Self::AgentAnalysing,
        Self::AnalysingReport,
        Self::AgentReportVertical,
        Self::AgentReportHorizontal,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::AgentProcessingVertical => 0,
            Self::AgentProcessingHorizontal => 1,
            Self::ProcessingAnalysing => 2,
            Self::AgentAnalysing => 3,
            Self::AnalysingReport => 4,
            Self::AgentReportVertical => 5,
            Self::AgentReportHorizontal => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::AgentProcessingVertical => "agent-processing-vertical",
            Self::AgentProcessingHorizontal => "agent-processing-horizontal",
            Self::ProcessingAnalysing => "processing-analysing",
            Self::AgentAnalysing => "agent-analysing",
            Self::AnalysingReport => "analysing-report",
            Self::AgentReportVertical => "agent-report-vertical",
            Self::AgentReportHorizontal => "agent-report-horizontal",
        }
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis of a node centre a coordinate is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal component
    X,
    /// Vertical component
    Y,
}

/// A single coordinate: one axis of a node centre plus a literal offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    node: NodeKey,
    axis: Axis,
    offset: f32,
}

impl Coord {
    pub const fn x(node: NodeKey, offset: f32) -> Self {
        Self {
            node,
            axis: Axis::X,
            offset,
        }
    }

    pub const fn y(node: NodeKey, offset: f32) -> Self {
        Self {
            node,
            axis: Axis::Y,
            offset,
        }
    }

    pub fn node(self) -> NodeKey {
        self.node
    }

    fn resolve(self, layout: &NodeLayout) -> f32 {
        let center = layout.center(self.node);
        let base = match self.axis {
            Axis::X => center.x(),
            Axis::Y => center.y(),
        };
        base + self.offset
    }
}

/// How to derive one leg from the node layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegSpec {
    x1: Coord,
    y1: Coord,
    x2: Coord,
    y2: Coord,
    downward: bool,
}

impl LegSpec {
    pub const fn new(x1: Coord, y1: Coord, x2: Coord, y2: Coord) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            downward: false,
        }
    }

    /// Normalises the leg to always draw top-to-bottom, whichever end
    /// is higher.
    pub const fn downward(mut self) -> Self {
        self.downward = true;
        self
    }

    /// Nodes this leg reads, in narrative order.
    pub fn dependencies(&self) -> Vec<NodeKey> {
        let mut nodes: Vec<_> = [self.x1, self.y1, self.x2, self.y2]
            .iter()
            .map(|coord| coord.node())
            .collect();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }

    fn endpoints(&self, layout: &NodeLayout) -> (Point, Point) {
        let start = Point::new(self.x1.resolve(layout), self.y1.resolve(layout));
        let end = Point::new(self.x2.resolve(layout), self.y2.resolve(layout));

        if self.downward && start.y() > end.y() {
            (end, start)
        } else {
            (start, end)
        }
    }
}

/// Corrective offset table of a variant: one [`LegSpec`] per [`SegmentKey`].
#[derive(Debug, Clone, PartialEq)]
pub struct LegTable {
    // Indexed by `SegmentKey::index`
    legs: [LegSpec; 7],
}

impl LegTable {
    pub fn for_variant(variant: DiagramVariant) -> Self {
        use self::Coord as C;

        use crate::topology::NodeKey::{Agent as A, Analysing as An, Processing as P, Report as R};

        let legs = match variant {
            DiagramVariant::Standard => [
                LegSpec::new(C::x(A, 3.0), C::y(A, -22.0), C::x(A, 3.0), C::y(P, 18.0)),
                LegSpec::new(C::x(A, 3.0), C::y(P, 18.0), C::x(P, 10.0), C::y(P, 18.0)),
                LegSpec::new(
                    C::x(P, -12.0),
                    C::y(P, 22.0),
                    C::x(P, -12.0),
                    C::y(An, -22.0),
                )
                .downward(),
                LegSpec::new(C::x(A, 22.0), C::y(An, 6.0), C::x(An, -22.0), C::y(An, 6.0)),
                LegSpec::new(
                    C::x(An, 12.0),
                    C::y(An, 22.0),
                    C::x(An, 12.0),
                    C::y(R, -22.0),
                ),
                LegSpec::new(C::x(A, 3.0), C::y(A, 48.0), C::x(A, 3.0), C::y(R, -18.0)),
                LegSpec::new(C::x(A, 3.0), C::y(R, -18.0), C::x(R, 16.0), C::y(R, -18.0)),
            ],
            DiagramVariant::Wide => [
                LegSpec::new(C::x(A, 4.0), C::y(A, -24.0), C::x(A, 4.0), C::y(P, 18.0)),
                LegSpec::new(C::x(A, 4.0), C::y(P, 18.0), C::x(P, 12.0), C::y(P, 18.0)),
                LegSpec::new(
                    C::x(P, -14.0),
                    C::y(P, 24.0),
                    C::x(P, -14.0),
                    C::y(An, -24.0),
                )
                .downward(),
                LegSpec::new(C::x(A, 24.0), C::y(An, 8.0), C::x(An, -24.0), C::y(An, 8.0)),
                LegSpec::new(
                    C::x(An, 14.0),
                    C::y(An, 24.0),
                    C::x(An, 14.0),
                    C::y(R, -24.0),
                ),
                LegSpec::new(C::x(A, 4.0), C::y(A, 52.0), C::x(A, 4.0), C::y(R, -18.0)),
                LegSpec::new(C::x(A, 4.0), C::y(R, -18.0), C::x(R, 14.0), C::y(R, -18.0)),
            ],
        };

        Self { legs }
    }

    pub fn get(&self, key: SegmentKey) -> &LegSpec {
        &self.legs[key.index()]
    }
}

impl Default for LegTable {
    fn default() -> Self {
        Self::for_variant(DiagramVariant::default())
    }
}

/// A directed straight leg with absolute endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    key: SegmentKey,
    start: Point,
    end: Point,
    dependencies: Vec<NodeKey>,
}

impl Segment {
    pub fn key(&self) -> SegmentKey {
        self.key
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Length of the leg in pixels; zero for degenerate legs.
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Nodes whose position this leg is derived from.
    pub fn dependencies(&self) -> &[NodeKey] {
        &self.dependencies
    }
}

/// All seven legs of a diagram, in [`SegmentKey::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSet {
    segments: Vec<Segment>,
}

impl SegmentSet {
    pub fn get(&self, key: SegmentKey) -> &Segment {
        &self.segments[key.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Derives the endpoints of every leg from the node layout.
pub fn build_segments(layout: &NodeLayout, legs: &LegTable) -> SegmentSet {
    let segments = SegmentKey::ALL
        .into_iter()
        .map(|key| {
            let spec = legs.get(key);
            let (start, end) = spec.endpoints(layout);
            trace!(segment = key.name(), start:?, end:?; "Segment built");
            Segment {
                key,
                start,
                end,
                dependencies: spec.dependencies(),
            }
        })
        .collect();

    SegmentSet { segments }
}
