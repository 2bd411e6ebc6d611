//! Layout engine: resolves node specs into absolute positions.
//!
//! Layout is a pure function of the [`NodeSpecs`] and the [`ContainerSize`]:
//! every node centre is its anchor resolved against the container plus its
//! pixel offset. Results are recomputed from scratch on every size change,
//! never patched.
//!
//! [`LayoutEngine`] wraps that function with change gating, so a host that
//! reports the same size repeatedly does not trigger recomputation.

use log::{debug, trace};

use stageflow_core::geometry::{Bounds, ContainerSize, Point};

use crate::{
    segments::{LegTable, SegmentSet, build_segments},
    topology::{IconRef, NodeKey, NodeSpecs, icon_size},
};

/// A node placed at an absolute centre.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode {
    key: NodeKey,
    center: Point,
    label: String,
    icon: IconRef,
}

impl ResolvedNode {
    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> &IconRef {
        &self.icon
    }

    /// Bounding box of the node icon.
    pub fn icon_bounds(&self) -> Bounds {
        self.center.to_bounds(icon_size())
    }
}

/// Resolved positions of all four nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLayout {
    // Indexed by `NodeKey::index`
    nodes: Vec<ResolvedNode>,
}

impl NodeLayout {
    pub fn get(&self, key: NodeKey) -> &ResolvedNode {
        &self.nodes[key.index()]
    }

    /// Shorthand for the centre of `key`.
    pub fn center(&self, key: NodeKey) -> Point {
        self.get(key).center()
    }

    /// Iterates nodes in narrative order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedNode> {
        self.nodes.iter()
    }
}

/// Resolves every spec against `size`.
///
/// Containers with zero or invalid dimensions are not an error: every
/// anchor collapses to the origin and nodes sit at their raw offsets.
///
/// # Examples
///
/// ```
/// # use stageflow::layout::compute_layout;
/// # use stageflow::topology::{NodeKey, NodeSpecs};
/// # use stageflow_core::geometry::{ContainerSize, Point};
/// let layout = compute_layout(&NodeSpecs::default(), ContainerSize::new(920.0, 560.0));
/// assert_eq!(layout.center(NodeKey::Processing), Point::new(460.0, 110.0));
/// ```
pub fn compute_layout(specs: &NodeSpecs, size: ContainerSize) -> NodeLayout {
    let nodes = specs
        .iter()
        .map(|spec| ResolvedNode {
            key: spec.key(),
            center: spec.anchor().resolve(size).add_point(spec.offset()),
            label: spec.label().to_string(),
            icon: spec.icon().clone(),
        })
        .collect();

    NodeLayout { nodes }
}

/// Everything positional the renderer needs for one container size.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramGeometry {
    size: ContainerSize,
    nodes: NodeLayout,
    segments: SegmentSet,
}

impl DiagramGeometry {
    /// Computes node positions and leg endpoints for `size`.
    pub fn compute(specs: &NodeSpecs, legs: &LegTable, size: ContainerSize) -> Self {
        let nodes = compute_layout(specs, size);
        let segments = build_segments(&nodes, legs);
        Self {
            size,
            nodes,
            segments,
        }
    }

    pub fn size(&self) -> ContainerSize {
        self.size
    }

    pub fn nodes(&self) -> &NodeLayout {
        &self.nodes
    }

    pub fn segments(&self) -> &SegmentSet {
        &self.segments
    }
}

/// Per-diagram layout state with recomputation gated on size changes.
#[derive(Debug)]
pub struct LayoutEngine {
    specs: NodeSpecs,
    legs: LegTable,
    geometry: DiagramGeometry,
    recompute_count: usize,
}

impl LayoutEngine {
    /// Creates an engine laid out for the default, unmeasured container.
    pub fn new(specs: NodeSpecs, legs: LegTable) -> Self {
        let geometry = DiagramGeometry::compute(&specs, &legs, ContainerSize::default());
        Self {
            specs,
            legs,
            geometry,
            recompute_count: 1,
        }
    }

    /// Feeds a new container size into the engine.
    ///
    /// Returns `true` if the size differed from the last one and the
    /// geometry was recomputed.
    pub fn update(&mut self, size: ContainerSize) -> bool {
        if size == self.geometry.size() {
            trace!(width = size.width(), height = size.height(); "Container size unchanged");
            return false;
        }

        if size.is_degenerate() {
            debug!(
                width = size.width(),
                height = size.height();
                "Degenerate container, anchors collapse toward the origin"
            );
        }

        self.geometry = DiagramGeometry::compute(&self.specs, &self.legs, size);
        self.recompute_count += 1;

        debug!(
            width = size.width(),
            height = size.height(),
            recompute_count = self.recompute_count;
            "Layout recomputed"
        );
        trace!(geometry:? = self.geometry; "Diagram geometry");
        true
    }

    pub fn geometry(&self) -> &DiagramGeometry {
        &self.geometry
    }

    pub fn size(&self) -> ContainerSize {
        self.geometry.size()
    }

    /// Number of times the geometry has been computed, including the
    /// initial layout.
    pub fn recompute_count(&self) -> usize {
        self.recompute_count
    }

    pub fn specs(&self) -> &NodeSpecs {
        &self.specs
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::topology::DiagramVariant;

    // ===================
    // Strategies
    // ===================

    fn container_strategy() -> impl Strategy<Value = ContainerSize> {
        (0.0f32..4000.0, 0.0f32..4000.0).prop_map(|(w, h)| ContainerSize::new(w, h))
    }

    fn variant_strategy() -> impl Strategy<Value = DiagramVariant> {
        prop_oneof![Just(DiagramVariant::Standard), Just(DiagramVariant::Wide)]
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Computing the layout twice for the same input yields the same result.
    fn check_layout_idempotent(
        variant: DiagramVariant,
        size: ContainerSize,
    ) -> Result<(), TestCaseError> {
        let specs = NodeSpecs::for_variant(variant);
        let legs = LegTable::for_variant(variant);

        let first = DiagramGeometry::compute(&specs, &legs, size);
        let second = DiagramGeometry::compute(&specs, &legs, size);
        prop_assert_eq!(first, second);
        Ok(())
    }

    /// An engine that has seen a size never recomputes for it again, and
    /// always agrees with a fresh computation.
    fn check_engine_matches_fresh_layout(
        variant: DiagramVariant,
        sizes: Vec<ContainerSize>,
    ) -> Result<(), TestCaseError> {
        let specs = NodeSpecs::for_variant(variant);
        let legs = LegTable::for_variant(variant);
        let mut engine = LayoutEngine::new(specs.clone(), legs.clone());

        for size in sizes {
            engine.update(size);
            let count = engine.recompute_count();
            prop_assert!(!engine.update(size));
            prop_assert_eq!(engine.recompute_count(), count);
            prop_assert_eq!(
                engine.geometry(),
                &DiagramGeometry::compute(&specs, &legs, size)
            );
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn layout_idempotent(variant in variant_strategy(), size in container_strategy()) {
            check_layout_idempotent(variant, size)?;
        }

        #[test]
        fn engine_matches_fresh_layout(
            variant in variant_strategy(),
            sizes in prop::collection::vec(container_strategy(), 1..6),
        ) {
            check_engine_matches_fresh_layout(variant, sizes)?;
        }
    }
}
