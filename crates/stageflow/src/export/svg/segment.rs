//! SVG rendering for connector legs.

use svg::node::element as svg_element;

use stageflow_core::{
    apply_stroke,
    draw::{LayeredOutput, RenderLayer, animation},
};

use super::Svg;
use crate::{segments::Segment, timeline::TimelineEntry};

impl Svg {
    /// Renders a leg that draws itself from start to end.
    ///
    /// The dash pattern is one dash exactly as long as the leg, offset by
    /// its full length, so the line starts hidden and the animation slides
    /// it into view.
    pub fn render_segment(&self, segment: &Segment, entry: TimelineEntry) -> LayeredOutput {
        let length = segment.length();
        let (start, end) = (segment.start(), segment.end());

        let line = svg_element::Line::new()
            .set("data-segment", segment.key().name())
            .set("x1", start.x())
            .set("y1", start.y())
            .set("x2", end.x())
            .set("y2", end.y())
            .set("stroke-dasharray", length)
            .set("stroke-dashoffset", length);

        let line = apply_stroke!(line, &self.stroke).add(animation::draw(
            length,
            entry.delay(),
            entry.duration(),
            self.easing,
        ));

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Segment, Box::new(line));
        output
    }
}
