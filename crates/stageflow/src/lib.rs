//! Stageflow - an animated four-stage flow diagram.
//!
//! Lays out the Agent → Processing → Analysing → Report diagram inside a
//! resizable container, schedules the fade-in and draw animations, and
//! renders the result as an animated SVG.
//!
//! The pipeline is one-directional:
//!
//! ```text
//! ContainerSize → anchors → NodeLayout → SegmentSet ┐
//! TimingConstants → Timeline ───────────────────────┴→ SVG
//! ```

pub mod config;
pub mod export;
pub mod icon;
pub mod layout;
pub mod observer;
pub mod segments;
pub mod timeline;
pub mod topology;

mod error;

pub use stageflow_core::{anchor, color, draw, geometry};

pub use error::StageflowError;

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, svg::SvgBuilder};
use geometry::ContainerSize;
use icon::IconProvider;
use layout::{DiagramGeometry, LayoutEngine};
use observer::{HostContainer, MountedDiagram};
use segments::LegTable;
use timeline::Timeline;
use topology::NodeSpecs;

/// Entry point for laying out, animating and rendering the diagram.
///
/// Each instance owns its specs, leg table and timeline; instances share no
/// state.
///
/// # Examples
///
/// ```
/// use stageflow::{FlowDiagram, geometry::ContainerSize, observer::HostContainer};
///
/// // Render once for a fixed size
/// let diagram = FlowDiagram::default();
/// let svg = diagram
///     .render_svg(ContainerSize::new(920.0, 560.0))
///     .expect("Failed to render");
/// assert!(svg.contains("<svg"));
///
/// // Or follow a resizable host
/// let host = HostContainer::new(ContainerSize::new(640.0, 400.0));
/// let mounted = diagram.mount(&host);
/// host.resize(ContainerSize::new(1024.0, 600.0));
/// assert_eq!(mounted.size(), ContainerSize::new(1024.0, 600.0));
/// mounted.unmount();
/// ```
#[derive(Debug)]
pub struct FlowDiagram {
    config: AppConfig,
    specs: NodeSpecs,
    legs: LegTable,
    timeline: Timeline,
}

impl FlowDiagram {
    /// Create a diagram from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StageflowError::Config`] for invalid timing or style values
    /// and conflicting node overrides.
    pub fn new(config: AppConfig) -> Result<Self, StageflowError> {
        info!(variant = config.variant().name(); "Building flow diagram");

        config.validate()?;
        let specs = config.node_specs()?;
        let legs = LegTable::for_variant(config.variant());
        let timeline = Timeline::schedule(config.timing());

        debug!(overrides = config.nodes().len(); "Node specs resolved");
        trace!(specs:?; "Node specs");

        Ok(Self {
            config,
            specs,
            legs,
            timeline,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn specs(&self) -> &NodeSpecs {
        &self.specs
    }

    /// The animation schedule.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Compute node positions and leg endpoints for `size`.
    pub fn geometry(&self, size: ContainerSize) -> DiagramGeometry {
        DiagramGeometry::compute(&self.specs, &self.legs, size)
    }

    /// A fresh layout engine for this diagram, laid out for the default size.
    pub fn layout_engine(&self) -> LayoutEngine {
        LayoutEngine::new(self.specs.clone(), self.legs.clone())
    }

    /// Render the animated SVG for `size`, linking icon references as-is.
    ///
    /// # Errors
    ///
    /// Returns [`StageflowError::Export`] if rendering fails.
    pub fn render_svg(&self, size: ContainerSize) -> Result<String, StageflowError> {
        let exporter = SvgBuilder::new().with_style(self.config.style()).build()?;
        self.export(&exporter, size)
    }

    /// Render the animated SVG for `size`, loading icons through `provider`.
    ///
    /// Icons the provider fails to load are rendered as placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`StageflowError::Export`] if rendering fails.
    pub fn render_svg_with_icons(
        &self,
        size: ContainerSize,
        provider: Box<dyn IconProvider>,
    ) -> Result<String, StageflowError> {
        let exporter = SvgBuilder::new()
            .with_style(self.config.style())
            .with_icon_provider(provider)
            .build()?;
        self.export(&exporter, size)
    }

    /// Attach a per-instance layout engine to `host`.
    ///
    /// The diagram is laid out for the host's current size and follows its
    /// resizes until the returned handle is unmounted or dropped.
    pub fn mount(&self, host: &HostContainer) -> MountedDiagram {
        MountedDiagram::attach(host, self.layout_engine())
    }

    fn export(
        &self,
        exporter: &dyn Exporter,
        size: ContainerSize,
    ) -> Result<String, StageflowError> {
        let geometry = self.geometry(size);
        let svg = exporter.export_diagram(&geometry, &self.timeline)?;

        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}

impl Default for FlowDiagram {
    fn default() -> Self {
        let config = AppConfig::default();
        Self {
            specs: NodeSpecs::for_variant(config.variant()),
            legs: LegTable::for_variant(config.variant()),
            timeline: Timeline::schedule(config.timing()),
            config,
        }
    }
}
