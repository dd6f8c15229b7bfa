//! Drawing primitives consumed by a passive renderer.
//!
//! Coordinates are in drawing units (scaled millimetres). The xy reference
//! line lies on `y = 0`. The front view is drawn above it (y = height above HP)
//! and the top view below it (y = minus the distance in front of VP).

use serde::{Deserialize, Serialize};

/// A 2D point for serializable drawing output.
///
/// A custom type rather than `nalgebra::Point2`, so the wire format is plain
/// `{ "x": .., "y": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point2D {
    /// Create a new 2D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<nalgebra::Point2<f64>> for Point2D {
    fn from(p: nalgebra::Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Point2D> for nalgebra::Point2<f64> {
    fn from(p: Point2D) -> Self {
        nalgebra::Point2::new(p.x, p.y)
    }
}

/// Which view an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewTag {
    /// Projection on HP, drawn below xy.
    TopView,
    /// Projection on VP, drawn above xy.
    FrontView,
    /// Spans both views (xy line, projectors).
    Reference,
}

/// Drawing role; the renderer picks stroke color and weight from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The xy line.
    Reference,
    /// Thin projector joining a point's two views.
    Projector,
    /// A point known from the data.
    Given,
    /// Trial positions and helper lines.
    Construction,
    /// Locus lines and swing arcs.
    Locus,
    /// A projection that shows the true length.
    TrueLength,
    /// The required projection.
    Result,
    /// Dimension lines.
    Dimension,
    /// Plain annotation text.
    Note,
}

impl Role {
    /// Default stroke color (CSS hex).
    pub fn color(&self) -> &'static str {
        match self {
            Role::Reference => "#1f2937",
            Role::Projector => "#9ca3af",
            Role::Given => "#2563eb",
            Role::Construction => "#60a5fa",
            Role::Locus => "#f59e0b",
            Role::TrueLength => "#dc2626",
            Role::Result => "#16a34a",
            Role::Dimension => "#7c3aed",
            Role::Note => "#374151",
        }
    }
}

/// Geometry of an auxiliary locus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum LocusPath {
    /// Straight locus line.
    Straight {
        /// Start point.
        from: Point2D,
        /// End point.
        to: Point2D,
    },
    /// Circular swing arc, angles in degrees counter-clockwise from +x.
    Arc {
        /// Centre of rotation.
        center: Point2D,
        /// Radius.
        radius: f64,
        /// Start angle in degrees.
        start_deg: f64,
        /// End angle in degrees.
        end_deg: f64,
    },
}

/// A drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderElement {
    /// A point, optionally labelled. `ring` marks two coincident ends.
    Point {
        /// Position.
        at: Point2D,
        /// View.
        view: ViewTag,
        /// Role.
        role: Role,
        /// Label such as `a'` or `b(a)`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        /// Draw a distinguishing ring: both ends of the line project here.
        ring: bool,
    },
    /// A line segment.
    Line {
        /// Start point.
        from: Point2D,
        /// End point.
        to: Point2D,
        /// View.
        view: ViewTag,
        /// Role.
        role: Role,
        /// Optional label.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Projector joining the two views of a point (perpendicular to xy).
    Projector {
        /// Start point.
        from: Point2D,
        /// End point.
        to: Point2D,
        /// View.
        view: ViewTag,
        /// Role.
        role: Role,
    },
    /// Free text.
    Label {
        /// Anchor position.
        at: Point2D,
        /// Text.
        text: String,
        /// View.
        view: ViewTag,
        /// Role.
        role: Role,
    },
    /// Dimension between two points, drawn `offset` units to the left of `from → to`.
    DimensionAnnotation {
        /// Start point.
        from: Point2D,
        /// End point.
        to: Point2D,
        /// Perpendicular offset of the dimension line.
        offset: f64,
        /// Text such as `TL = 70 mm`.
        text: String,
        /// View.
        view: ViewTag,
        /// Role.
        role: Role,
    },
    /// Locus line or swing arc used in the auxiliary construction.
    AuxiliaryLocus {
        /// Path.
        path: LocusPath,
        /// View.
        view: ViewTag,
        /// Role.
        role: Role,
        /// Optional label.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl RenderElement {
    /// A plain point.
    pub fn point(at: Point2D, view: ViewTag, role: Role) -> Self {
        RenderElement::Point {
            at,
            view,
            role,
            label: None,
            ring: false,
        }
    }

    /// A line segment.
    pub fn line(from: Point2D, to: Point2D, view: ViewTag, role: Role) -> Self {
        RenderElement::Line {
            from,
            to,
            view,
            role,
            label: None,
        }
    }

    /// A projector between the views of one point.
    pub fn projector(from: Point2D, to: Point2D) -> Self {
        RenderElement::Projector {
            from,
            to,
            view: ViewTag::Reference,
            role: Role::Projector,
        }
    }

    /// Free text.
    pub fn label(at: Point2D, text: impl Into<String>, view: ViewTag) -> Self {
        RenderElement::Label {
            at,
            text: text.into(),
            view,
            role: Role::Note,
        }
    }

    /// A dimension annotation.
    pub fn dimension(
        from: Point2D,
        to: Point2D,
        offset: f64,
        text: impl Into<String>,
        view: ViewTag,
    ) -> Self {
        RenderElement::DimensionAnnotation {
            from,
            to,
            offset,
            text: text.into(),
            view,
            role: Role::Dimension,
        }
    }

    /// A straight locus line.
    pub fn locus_line(from: Point2D, to: Point2D, view: ViewTag) -> Self {
        RenderElement::AuxiliaryLocus {
            path: LocusPath::Straight { from, to },
            view,
            role: Role::Locus,
            label: None,
        }
    }

    /// A swing arc.
    pub fn locus_arc(
        center: Point2D,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        view: ViewTag,
    ) -> Self {
        RenderElement::AuxiliaryLocus {
            path: LocusPath::Arc {
                center,
                radius,
                start_deg,
                end_deg,
            },
            view,
            role: Role::Locus,
            label: None,
        }
    }

    /// Attach a label (points, lines and loci; other kinds are returned unchanged).
    pub fn labelled(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            RenderElement::Point { label, .. }
            | RenderElement::Line { label, .. }
            | RenderElement::AuxiliaryLocus { label, .. } => *label = Some(text.into()),
            _ => {}
        }
        self
    }

    /// Mark a point as the coincident projection of both ends.
    pub fn ringed(mut self) -> Self {
        if let RenderElement::Point { ring, .. } = &mut self {
            *ring = true;
        }
        self
    }

    /// View tag.
    pub fn view(&self) -> ViewTag {
        match self {
            RenderElement::Point { view, .. }
            | RenderElement::Line { view, .. }
            | RenderElement::Projector { view, .. }
            | RenderElement::Label { view, .. }
            | RenderElement::DimensionAnnotation { view, .. }
            | RenderElement::AuxiliaryLocus { view, .. } => *view,
        }
    }

    /// Role tag.
    pub fn role(&self) -> Role {
        match self {
            RenderElement::Point { role, .. }
            | RenderElement::Line { role, .. }
            | RenderElement::Projector { role, .. }
            | RenderElement::Label { role, .. }
            | RenderElement::DimensionAnnotation { role, .. }
            | RenderElement::AuxiliaryLocus { role, .. } => *role,
        }
    }

    /// Label or text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            RenderElement::Point { label, .. }
            | RenderElement::Line { label, .. }
            | RenderElement::AuxiliaryLocus { label, .. } => label.as_deref(),
            RenderElement::Label { text, .. } | RenderElement::DimensionAnnotation { text, .. } => {
                Some(text)
            }
            RenderElement::Projector { .. } => None,
        }
    }

    /// Segment length for lines, projectors and dimensions.
    pub fn length(&self) -> Option<f64> {
        match self {
            RenderElement::Line { from, to, .. }
            | RenderElement::Projector { from, to, .. }
            | RenderElement::DimensionAnnotation { from, to, .. } => Some(from.distance(to)),
            _ => None,
        }
    }
}

/// One numbered construction step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepInstruction {
    /// 1-based, contiguous.
    pub step_number: u32,
    /// Short title; the last step's title carries [`StepInstruction::DONE_MARKER`].
    pub title: String,
    /// One-line summary.
    pub subtitle: String,
    /// Everything drawn so far, in drawing order.
    pub render_elements: Vec<RenderElement>,
    /// Instruction text with the values actually used.
    pub instruction_text: String,
}

impl StepInstruction {
    /// Suffix of the final step's title.
    pub const DONE_MARKER: &'static str = "✓ Done";

    /// Check if this is a terminal step.
    pub fn is_final(&self) -> bool {
        self.title.ends_with(Self::DONE_MARKER)
    }

    /// Elements tagged with `view`.
    pub fn elements_in(&self, view: ViewTag) -> impl Iterator<Item = &RenderElement> {
        self.render_elements.iter().filter(move |e| e.view() == view)
    }

    /// First dimension annotation whose text starts with `prefix`.
    pub fn dimension(&self, prefix: &str) -> Option<&RenderElement> {
        self.render_elements.iter().find(|e| {
            matches!(e, RenderElement::DimensionAnnotation { text, .. } if text.starts_with(prefix))
        })
    }
}
