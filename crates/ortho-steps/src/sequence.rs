//! Drawing frame and cumulative step builder.

use nalgebra::{Point2, Rotation2, Vector2};
use ortho_ir::{Point2D, RenderElement, Role, StepInstruction, ViewTag};

use crate::config::DrawingConfig;

/// Maps construction measurements in millimetres onto drawing coordinates.
///
/// xy is the line `y = 0`. Front-view points sit `height` above it, top-view
/// points sit `distance` below it; both views share the projector through
/// end A at `x = origin_x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    scale: f64,
    xa: f64,
    margin: f64,
}

impl Frame {
    /// Frame for `config`.
    pub fn new(config: &DrawingConfig) -> Self {
        Self {
            scale: config.scale,
            xa: config.origin_x,
            margin: config.margin,
        }
    }

    /// Drawing units per millimetre.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Front-view point `along` mm to the right of end A's projector and `height` mm above xy.
    pub fn fv(&self, along: f64, height: f64) -> Point2D {
        Point2D::new(self.xa + self.scale * along, self.scale * height)
    }

    /// Top-view point `along` mm to the right of end A's projector and `distance` mm below xy.
    pub fn tv(&self, along: f64, distance: f64) -> Point2D {
        Point2D::new(self.xa + self.scale * along, -self.scale * distance)
    }

    /// Point on xy below/above the given drawing point.
    pub fn foot(&self, p: Point2D) -> Point2D {
        Point2D::new(p.x, 0.0)
    }

    /// The xy reference line, long enough for a construction `extent` mm wide.
    pub fn xy(&self, extent: f64) -> RenderElement {
        let from = Point2D::new(self.xa - self.margin, 0.0);
        let to = Point2D::new(self.xa + self.scale * extent.max(0.0) + self.margin, 0.0);
        RenderElement::line(from, to, ViewTag::Reference, Role::Reference).labelled("xy")
    }

    /// Horizontal locus through `p`, spanning the same width as [`Frame::xy`].
    pub fn locus_through(&self, p: Point2D, extent: f64, view: ViewTag) -> RenderElement {
        let from = Point2D::new(self.xa - self.margin, p.y);
        let to = Point2D::new(self.xa + self.scale * extent.max(0.0) + self.margin, p.y);
        RenderElement::locus_line(from, to, view)
    }

    /// Offset for dimension lines.
    pub fn dim_offset(&self) -> f64 {
        (self.margin / 2.0).max(5.0)
    }
}

/// Rotate `point` about `center` by `angle` radians (counter-clockwise).
pub fn swing(center: Point2D, point: Point2D, angle: f64) -> Point2D {
    let c: Point2<f64> = center.into();
    let p: Point2<f64> = point.into();
    let v: Vector2<f64> = Rotation2::new(angle) * (p - c);
    (c + v).into()
}

/// Direction of `to` seen from `from`, in degrees counter-clockwise from +x.
pub fn bearing(from: Point2D, to: Point2D) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

/// Builds a numbered sequence where every step carries everything drawn so far.
#[derive(Debug, Clone, Default)]
pub struct StepSequence {
    elements: Vec<RenderElement>,
    steps: Vec<StepInstruction>,
}

impl StepSequence {
    /// Empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element to the drawing.
    pub fn draw(&mut self, element: RenderElement) -> &mut Self {
        self.elements.push(element);
        self
    }

    /// Add several elements.
    pub fn draw_all(&mut self, elements: impl IntoIterator<Item = RenderElement>) -> &mut Self {
        self.elements.extend(elements);
        self
    }

    /// Remove elements carrying `label` in `view`; used when a point is redrawn.
    pub fn erase(&mut self, view: ViewTag, label: &str) -> &mut Self {
        self.elements
            .retain(|e| !(e.view() == view && e.text() == Some(label)));
        self
    }

    /// Close the current step.
    pub fn step(
        &mut self,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        instruction_text: impl Into<String>,
    ) -> &mut Self {
        self.steps.push(StepInstruction {
            step_number: self.steps.len() as u32 + 1,
            title: title.into(),
            subtitle: subtitle.into(),
            render_elements: self.elements.clone(),
            instruction_text: instruction_text.into(),
        });
        self
    }

    /// Number of closed steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if no step has been closed.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Finished steps; the last title carries the done marker.
    pub fn finish(mut self) -> Vec<StepInstruction> {
        if let Some(last) = self.steps.last_mut() {
            if !last.is_final() {
                last.title = format!("{} {}", last.title, StepInstruction::DONE_MARKER);
            }
        }
        self.steps
    }
}
