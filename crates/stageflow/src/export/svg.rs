//! Animated SVG backend.
//!
//! Connector legs are rendered as `<line>` elements revealed by a
//! `stroke-dashoffset` animation; nodes are groups that fade and scale in.
//! All timing comes from the [`Timeline`], all positions from the
//! [`DiagramGeometry`].

mod node;
mod segment;

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use stageflow_core::{
    color::Color,
    draw::{Easing, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::ContainerSize,
};

use crate::{
    config::StyleConfig,
    export::{self, Exporter},
    icon::{HrefIconProvider, IconProvider},
    layout::DiagramGeometry,
    timeline::Timeline,
};

/// Builder for [`Svg`] exporters.
///
/// # Examples
///
/// ```
/// # use stageflow::config::StyleConfig;
/// # use stageflow::export::svg::SvgBuilder;
/// let style = StyleConfig::default();
/// let exporter = SvgBuilder::new().with_style(&style).build().unwrap();
/// ```
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
    icons: Option<Box<dyn IconProvider>>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self {
            style: None,
            icons: None,
        }
    }

    /// Uses `style` instead of the default style.
    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Uses `provider` to load icons instead of linking references as-is.
    pub fn with_icon_provider(mut self, provider: Box<dyn IconProvider>) -> Self {
        self.icons = Some(provider);
        self
    }

    /// Builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a style value is invalid.
    pub fn build(self) -> Result<Svg, export::Error> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);

        Ok(Svg {
            background: style.background_color().map_err(export::Error::Render)?,
            stroke: style.stroke().map_err(export::Error::Render)?,
            label_color: style.label_color().map_err(export::Error::Render)?,
            font_family: style.font_family().to_string(),
            font_size: style.font_size(),
            easing: style.easing(),
            icons: self.icons.unwrap_or_else(|| Box::new(HrefIconProvider)),
        })
    }
}

impl Default for SvgBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// SVG exporter holding resolved style values.
pub struct Svg {
    background: Option<Color>,
    stroke: StrokeDefinition,
    label_color: Color,
    font_family: String,
    font_size: f32,
    easing: Easing,
    icons: Box<dyn IconProvider>,
}

impl Svg {
    /// Renders the animated document for `geometry`.
    pub fn render_document(&self, geometry: &DiagramGeometry, timeline: &Timeline) -> Document {
        let size = geometry.size();
        let mut output = LayeredOutput::new();

        if let Some(background) = self.background {
            output.add_to_layer(
                RenderLayer::Background,
                Box::new(background_rect(size, background)),
            );
        }

        for segment in geometry.segments().iter() {
            let entry = timeline.segment(segment.key());
            output.merge(self.render_segment(segment, entry));
        }

        for node in geometry.nodes().iter() {
            output.merge(self.render_node(node, timeline.node(node.key())));
        }

        let doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", size.width(), size.height()))
            .set("width", size.width())
            .set("height", size.height());

        output
            .render()
            .into_iter()
            .fold(doc, |doc, group| doc.add(group))
    }
}

impl Exporter for Svg {
    fn export_diagram(
        &self,
        geometry: &DiagramGeometry,
        timeline: &Timeline,
    ) -> Result<String, export::Error> {
        info!(
            width = geometry.size().width(),
            height = geometry.size().height();
            "Rendering SVG document"
        );

        let doc = self.render_document(geometry, timeline);
        debug!(total_duration = timeline.total_duration(); "SVG document rendered");

        Ok(doc.to_string())
    }
}

fn background_rect(size: ContainerSize, color: Color) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", 0)
        .set("y", 0)
        .set("width", size.width())
        .set("height", size.height())
        .set("fill", color.to_string())
        .set("fill-opacity", color.alpha())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        icon::{IconError, IconImage},
        segments::LegTable,
        topology::{IconRef, NodeSpecs},
    };

    struct FailingIcons;

    impl IconProvider for FailingIcons {
        fn load(&self, _icon: &IconRef) -> Result<IconImage, IconError> {
            Err(IconError::Empty)
        }
    }

    fn geometry(size: ContainerSize) -> DiagramGeometry {
        DiagramGeometry::compute(&NodeSpecs::default(), &LegTable::default(), size)
    }

    fn render(svg: &Svg, size: ContainerSize) -> String {
        svg.export_diagram(&geometry(size), &Timeline::default()).unwrap()
    }

    #[test]
    fn test_document_dimensions() {
        let svg = SvgBuilder::new().build().unwrap();
        let output = render(&svg, ContainerSize::new(920.0, 560.0));

        assert!(output.contains("viewBox=\"0 0 920 560\""));
        assert!(output.contains("width=\"920\""));
        assert!(output.contains("height=\"560\""));
    }

    #[test]
    fn test_one_animated_line_per_leg() {
        let svg = SvgBuilder::new().build().unwrap();
        let output = render(&svg, ContainerSize::default());

        assert_eq!(output.matches("<line").count(), 7);
        assert_eq!(
            output.matches("attributeName=\"stroke-dashoffset\"").count(),
            7
        );
    }

    #[test]
    fn test_one_animated_group_per_node() {
        let svg = SvgBuilder::new().build().unwrap();
        let output = render(&svg, ContainerSize::default());

        assert_eq!(output.matches("data-node=").count(), 4);
        assert_eq!(output.matches("type=\"scale\"").count(), 4);
        assert_eq!(output.matches("<image").count(), 4);
        assert!(output.contains("Agent Started"));
    }

    #[test]
    fn test_layers_in_order() {
        let style: StyleConfig = toml::from_str("background_color = \"white\"").unwrap();
        let svg = SvgBuilder::new().with_style(&style).build().unwrap();
        let output = render(&svg, ContainerSize::default());

        let background = output.find("data-layer=\"background\"").unwrap();
        let segment = output.find("data-layer=\"segment\"").unwrap();
        let node = output.find("data-layer=\"node\"").unwrap();
        assert!(background < segment && segment < node);
        assert!(!output.contains("data-layer=\"text\""));
    }

    #[test]
    fn test_icon_failure_renders_placeholder() {
        let svg = SvgBuilder::new()
            .with_icon_provider(Box::new(FailingIcons))
            .build()
            .unwrap();
        let output = render(&svg, ContainerSize::default());

        assert_eq!(output.matches("<image").count(), 0);
        assert_eq!(output.matches("data-placeholder=\"true\"").count(), 4);
    }

    #[test]
    fn test_degenerate_container_has_no_nan() {
        let svg = SvgBuilder::new().build().unwrap();
        let output = render(&svg, ContainerSize::new(0.0, 0.0));

        assert!(!output.contains("NaN"));
        assert_eq!(output.matches("<line").count(), 7);
    }

    #[test]
    fn test_invalid_style_fails_build() {
        let style: StyleConfig = toml::from_str("label_color = \"nope\"").unwrap();
        let result = SvgBuilder::new().with_style(&style).build();

        assert!(matches!(result, Err(export::Error::Render(_))));
    }
}
