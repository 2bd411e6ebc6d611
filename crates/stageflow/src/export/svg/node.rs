//! SVG rendering for diagram nodes.

use svg::node::element as svg_element;

use stageflow_core::{
    apply_stroke,
    draw::{LayeredOutput, RenderLayer, SvgNode, animation},
    geometry::Bounds,
};

use super::Svg;
use crate::{
    icon::{IconImage, resolve_icon},
    layout::ResolvedNode,
    timeline::TimelineEntry,
};

/// Gap between the bottom edge of an icon and its label baseline.
const LABEL_GAP: f32 = 16.0;

impl Svg {
    /// Renders a node as a translated group that fades and scales in.
    ///
    /// Icon and label share one animated group, so they appear together and
    /// scale around the node centre.
    pub fn render_node(&self, node: &ResolvedNode, entry: TimelineEntry) -> LayeredOutput {
        let center = node.center();
        let bounds = node.icon_bounds();

        let label = svg_element::Text::new(node.label())
            .set("x", 0)
            .set("y", bounds.height() / 2.0 + LABEL_GAP)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "hanging")
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("fill", self.label_color.to_string());

        let animated = svg_element::Group::new()
            .set("opacity", 0)
            .add(animation::fade_in(entry.delay(), entry.duration(), self.easing))
            .add(animation::scale_in(entry.delay(), entry.duration(), self.easing))
            .add(self.render_icon(node, bounds))
            .add(label);

        let group = svg_element::Group::new()
            .set("transform", format!("translate({} {})", center.x(), center.y()))
            .set("data-node", node.key().name())
            .add(animated);

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Node, Box::new(group));
        output
    }

    /// Icon image or placeholder, positioned relative to the node centre.
    fn render_icon(&self, node: &ResolvedNode, bounds: Bounds) -> SvgNode {
        let origin = bounds.min_point().sub_point(node.center());

        match resolve_icon(&*self.icons, node.icon()) {
            IconImage::Href(href) => Box::new(
                svg_element::Image::new()
                    .set("href", href)
                    .set("x", origin.x())
                    .set("y", origin.y())
                    .set("width", bounds.width())
                    .set("height", bounds.height()),
            ),
            IconImage::Placeholder => {
                let rect = svg_element::Rectangle::new()
                    .set("data-placeholder", "true")
                    .set("x", origin.x())
                    .set("y", origin.y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("rx", 6)
                    .set("fill", "none");
                Box::new(apply_stroke!(rect, &self.stroke))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use stageflow_core::geometry::ContainerSize;

    use super::*;
    use crate::{
        export::svg::SvgBuilder,
        layout::compute_layout,
        topology::{NodeKey, NodeSpecs},
    };

    #[test]
    fn test_render_node_single_animated_group() {
        let layout = compute_layout(&NodeSpecs::default(), ContainerSize::new(920.0, 560.0));
        let svg = SvgBuilder::new().build().unwrap();

        let rendered: Vec<String> = svg
            .render_node(
                layout.get(NodeKey::Processing),
                TimelineEntry::new(3.3, 0.6),
            )
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect();

        assert_eq!(rendered.len(), 1);

        let node = &rendered[0];
        assert!(node.contains("data-layer=\"node\""));
        assert!(node.contains("translate(460 110)"));
        assert!(node.contains("data-node=\"processing\""));
        assert!(node.contains("href=\"icons/processing.svg\""));
        assert!(node.contains("x=\"-18\""));
        assert!(node.contains("width=\"36\""));
        assert!(node.contains("opacity=\"0\""));
        assert!(node.contains("begin=\"3300ms\""));
        assert!(node.contains("Processing"));
        assert!(node.contains("y=\"34\""));
        assert_eq!(node.matches("type=\"scale\"").count(), 1);
        assert_eq!(node.matches("attributeName=\"opacity\"").count(), 1);
    }
}
