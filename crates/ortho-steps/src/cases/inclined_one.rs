//! Lines inclined to one plane and parallel to the other.
//!
//! The view on the parallel plane shows the true length at the true
//! inclination; the other view is parallel to xy and shortened to TL·cos.

use ortho_ir::format::{deg, mm, rounded};
use ortho_ir::{CaseType, ConstraintSet, Point2D, RenderElement, Role, SlotName, ViewTag};

use super::{CaseHandler, Inputs};
use crate::error::Result;
use crate::sequence::{Frame, StepSequence};

const REQUIRED_HP: &[SlotName] = &[
    SlotName::TrueLength,
    SlotName::Theta,
    SlotName::HeightA,
    SlotName::DistanceA,
];
const REQUIRED_VP: &[SlotName] = &[
    SlotName::TrueLength,
    SlotName::Phi,
    SlotName::HeightA,
    SlotName::DistanceA,
];

/// Which view carries the true length.
struct Layout {
    true_view: ViewTag,
    plan_view: ViewTag,
    true_labels: [&'static str; 2],
    plan_labels: [&'static str; 2],
    /// Plane the line is inclined to.
    inclined_to: &'static str,
    /// Plane the line is parallel to.
    parallel_to: &'static str,
    symbol: &'static str,
}

const TOWARD_HP: Layout = Layout {
    true_view: ViewTag::FrontView,
    plan_view: ViewTag::TopView,
    true_labels: ["a'", "b'"],
    plan_labels: ["a", "b"],
    inclined_to: "HP",
    parallel_to: "VP",
    symbol: "θ",
};

const TOWARD_VP: Layout = Layout {
    true_view: ViewTag::TopView,
    plan_view: ViewTag::FrontView,
    true_labels: ["a", "b"],
    plan_labels: ["a'", "b'"],
    inclined_to: "VP",
    parallel_to: "HP",
    symbol: "φ",
};

struct Ends {
    true_a: Point2D,
    true_b: Point2D,
    plan_a: Point2D,
    plan_b: Point2D,
}

fn view_name(view: ViewTag) -> &'static str {
    match view {
        ViewTag::FrontView => "front view",
        ViewTag::TopView => "top view",
        ViewTag::Reference => "reference",
    }
}

fn draw(layout: &Layout, frame: &Frame, ends: &Ends, tl: f64, angle: f64, h: f64, d: f64) -> StepSequence {
    let run = tl * angle.to_radians().cos();
    let rise = tl * angle.to_radians().sin();
    let [ta, tb] = layout.true_labels;
    let [pa, pb] = layout.plan_labels;
    let true_name = view_name(layout.true_view);
    let plan_name = view_name(layout.plan_view);
    let offset = frame.dim_offset();
    let mut seq = StepSequence::new();

    seq.draw(frame.xy(run)).step(
        "Draw the reference line",
        "xy separates the front view from the top view",
        "Draw a horizontal line and name it xy. The front view (FV) is drawn above xy, \
         the top view (TV) below it.",
    );

    let (front_a, top_a) = match layout.true_view {
        ViewTag::FrontView => (ends.true_a, ends.plan_a),
        _ => (ends.plan_a, ends.true_a),
    };
    seq.draw(RenderElement::projector(top_a, front_a))
        .draw(RenderElement::point(front_a, ViewTag::FrontView, Role::Given).labelled("a'"))
        .draw(RenderElement::point(top_a, ViewTag::TopView, Role::Given).labelled("a"))
        .step(
            "Locate end A",
            "a' above xy, a below xy, on one projector",
            format!(
                "Draw a projector perpendicular to xy. Mark a' {} above xy (end A is {} above HP) \
                 and a {} below xy (end A is {} in front of VP).",
                mm(h),
                mm(h),
                mm(d),
                mm(d)
            ),
        );

    seq.draw(RenderElement::point(ends.true_b, layout.true_view, Role::Result).labelled(tb))
        .draw(
            RenderElement::line(ends.true_a, ends.true_b, layout.true_view, Role::TrueLength)
                .labelled(format!("{ta}{tb}")),
        )
        .draw(RenderElement::label(
            ends.true_a,
            format!("{} = {}", layout.symbol, deg(angle)),
            layout.true_view,
        ))
        .step(
            format!("Draw the true length in the {true_name}"),
            format!("{ta}{tb} at {} to xy", deg(angle)),
            format!(
                "The line is parallel to {}, so its {true_name} shows the true length and the true \
                 inclination to {}. From {ta} draw {ta}{tb} = {} at {} to xy.",
                layout.parallel_to,
                layout.inclined_to,
                mm(tl),
                deg(angle)
            ),
        );

    seq.draw(RenderElement::projector(ends.true_b, ends.plan_b))
        .draw(RenderElement::point(ends.plan_b, layout.plan_view, Role::Result).labelled(pb))
        .draw(
            RenderElement::line(ends.plan_a, ends.plan_b, layout.plan_view, Role::Result)
                .labelled(format!("{pa}{pb}")),
        )
        .step(
            format!("Project the {plan_name}"),
            format!("{pa}{pb} parallel to xy"),
            format!(
                "Draw a projector from {tb} and a line through {pa} parallel to xy; they meet at \
                 {pb}. {pa}{pb} is the {plan_name}: parallel to xy and shortened to TL·cos {} = {} mm.",
                layout.symbol,
                rounded(run, 2)
            ),
        );

    seq.draw(RenderElement::dimension(
        ends.true_a,
        ends.true_b,
        offset,
        format!("TL = {}", mm(tl)),
        layout.true_view,
    ))
    .draw(RenderElement::dimension(
        ends.plan_a,
        ends.plan_b,
        -offset,
        format!("{pa}{pb} = {} mm", rounded(run, 2)),
        layout.plan_view,
    ))
    .draw(RenderElement::dimension(
        frame.foot(front_a),
        front_a,
        -offset,
        format!("h_A = {}", mm(h)),
        ViewTag::FrontView,
    ))
    .draw(RenderElement::dimension(
        top_a,
        frame.foot(top_a),
        -offset,
        format!("d_A = {}", mm(d)),
        ViewTag::TopView,
    ))
    .step(
        "Dimension the views",
        format!("{true_name} = true length at {}", deg(angle)),
        format!(
            "{ta}{tb} = {} at {} is the true length. {pa}{pb} = {} mm is parallel to xy. \
             End B is {} mm farther from {} than end A.",
            mm(tl),
            deg(angle),
            rounded(run, 2),
            rounded(rise, 2),
            layout.inclined_to
        ),
    );

    seq
}

/// Line inclined at θ to HP, parallel to VP.
#[derive(Debug, Clone, Copy, Default)]
pub struct InclinedToHp;

impl CaseHandler for InclinedToHp {
    fn case_type(&self) -> CaseType {
        CaseType::InclinedToHpParallelToVp
    }

    fn step_count(&self) -> usize {
        5
    }

    fn required_slots(&self) -> &'static [SlotName] {
        REQUIRED_HP
    }

    fn build(&self, c: &ConstraintSet, frame: &Frame) -> Result<StepSequence> {
        let inputs = Inputs::new(self.case_type(), c);
        let tl = inputs.true_length()?;
        let theta = inputs.oblique(SlotName::Theta)?;
        inputs.fixed(SlotName::Phi, 0.0)?;
        let h = inputs.position(SlotName::HeightA)?;
        let d = inputs.position(SlotName::DistanceA)?;

        let run = tl * theta.to_radians().cos();
        let rise = tl * theta.to_radians().sin();
        let ends = Ends {
            true_a: frame.fv(0.0, h),
            true_b: frame.fv(run, h + rise),
            plan_a: frame.tv(0.0, d),
            plan_b: frame.tv(run, d),
        };
        Ok(draw(&TOWARD_HP, frame, &ends, tl, theta, h, d))
    }
}

/// Line inclined at φ to VP, parallel to HP.
#[derive(Debug, Clone, Copy, Default)]
pub struct InclinedToVp;

impl CaseHandler for InclinedToVp {
    fn case_type(&self) -> CaseType {
        CaseType::InclinedToVpParallelToHp
    }

    fn step_count(&self) -> usize {
        5
    }

    fn required_slots(&self) -> &'static [SlotName] {
        REQUIRED_VP
    }

    fn build(&self, c: &ConstraintSet, frame: &Frame) -> Result<StepSequence> {
        let inputs = Inputs::new(self.case_type(), c);
        let tl = inputs.true_length()?;
        let phi = inputs.oblique(SlotName::Phi)?;
        inputs.fixed(SlotName::Theta, 0.0)?;
        let h = inputs.position(SlotName::HeightA)?;
        let d = inputs.position(SlotName::DistanceA)?;

        let run = tl * phi.to_radians().cos();
        let rise = tl * phi.to_radians().sin();
        let ends = Ends {
            true_a: frame.tv(0.0, d),
            true_b: frame.tv(run, d + rise),
            plan_a: frame.fv(0.0, h),
            plan_b: frame.fv(run, h),
        };
        Ok(draw(&TOWARD_VP, frame, &ends, tl, phi, h, d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DrawingConfig;
    use crate::error::StepError;
    use approx::assert_relative_eq;
    use ortho_ir::StepInstruction;

    fn line(theta: f64, phi: f64) -> ConstraintSet {
        ConstraintSet::new()
            .with(SlotName::TrueLength, 70.0)
            .with(SlotName::Theta, theta)
            .with(SlotName::Phi, phi)
            .with(SlotName::HeightA, 10.0)
            .with(SlotName::DistanceA, 15.0)
    }

    fn build(handler: &dyn CaseHandler, c: &ConstraintSet) -> Result<Vec<StepInstruction>> {
        let frame = Frame::new(&DrawingConfig::default());
        Ok(handler.build(c, &frame)?.finish())
    }

    #[test]
    fn test_inclined_to_hp() {
        let steps = build(&InclinedToHp, &line(30.0, 0.0)).unwrap();
        assert_eq!(steps.len(), 5);
        let last = &steps[4];
        assert!(last.is_final());

        let fv = last
            .elements_in(ViewTag::FrontView)
            .find(|e| e.role() == Role::TrueLength)
            .unwrap();
        assert_relative_eq!(fv.length().unwrap(), 70.0, epsilon = 1e-9);

        let tv = last
            .elements_in(ViewTag::TopView)
            .find(|e| matches!(e, RenderElement::Line { .. }))
            .unwrap();
        assert_relative_eq!(tv.length().unwrap(), 70.0 * 30f64.to_radians().cos(), epsilon = 1e-9);
        let RenderElement::Line { from, to, .. } = tv else {
            unreachable!()
        };
        assert_relative_eq!(from.y, to.y);
        assert_relative_eq!(from.y, -15.0);
        assert!(steps[3].instruction_text.contains("60.62 mm"));
    }

    #[test]
    fn test_inclined_to_vp() {
        let steps = build(&InclinedToVp, &line(0.0, 45.0)).unwrap();
        assert_eq!(steps.len(), 5);
        let last = &steps[4];

        let tv = last
            .elements_in(ViewTag::TopView)
            .find(|e| e.role() == Role::TrueLength)
            .unwrap();
        assert_relative_eq!(tv.length().unwrap(), 70.0, epsilon = 1e-9);

        let fv = last
            .elements_in(ViewTag::FrontView)
            .find(|e| matches!(e, RenderElement::Line { .. }))
            .unwrap();
        let RenderElement::Line { from, to, .. } = fv else {
            unreachable!()
        };
        assert_relative_eq!(from.y, 10.0);
        assert_relative_eq!(to.y, 10.0);
        assert!(last.dimension("TL").is_some());
        assert!(last.render_elements.iter().any(|e| e.text() == Some("φ = 45°")));
    }

    #[test]
    fn test_rejects_wrong_orientation() {
        let err = build(&InclinedToHp, &line(30.0, 20.0)).unwrap_err();
        assert!(matches!(err, StepError::OutOfRange { slot: SlotName::Phi, .. }));

        let err = build(&InclinedToVp, &line(0.0, 90.0)).unwrap_err();
        assert!(matches!(err, StepError::OutOfRange { slot: SlotName::Phi, .. }));
    }
}
