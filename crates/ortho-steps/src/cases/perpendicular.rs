//! Lines perpendicular to one plane: one view is a point, the other shows the true length.

use ortho_ir::format::mm;
use ortho_ir::{CaseType, ConstraintSet, RenderElement, Role, SlotName, ViewTag};

use super::{CaseHandler, Inputs};
use crate::error::Result;
use crate::sequence::{Frame, StepSequence};

const REQUIRED: &[SlotName] = &[SlotName::TrueLength, SlotName::HeightA, SlotName::DistanceA];

/// Line perpendicular to HP (vertical line).
#[derive(Debug, Clone, Copy, Default)]
pub struct PerpendicularToHp;

impl CaseHandler for PerpendicularToHp {
    fn case_type(&self) -> CaseType {
        CaseType::PerpendicularToHp
    }

    fn step_count(&self) -> usize {
        5
    }

    fn required_slots(&self) -> &'static [SlotName] {
        REQUIRED
    }

    fn build(&self, c: &ConstraintSet, frame: &Frame) -> Result<StepSequence> {
        let inputs = Inputs::new(self.case_type(), c);
        let tl = inputs.true_length()?;
        let h = inputs.position(SlotName::HeightA)?;
        let d = inputs.position(SlotName::DistanceA)?;
        inputs.fixed(SlotName::Theta, 90.0)?;
        inputs.fixed(SlotName::Phi, 0.0)?;

        let a_front = frame.fv(0.0, h);
        let b_front = frame.fv(0.0, h + tl);
        let a_top = frame.tv(0.0, d);
        let offset = frame.dim_offset();
        let mut seq = StepSequence::new();

        seq.draw(frame.xy(0.0)).step(
            "Draw the reference line",
            "xy separates the front view from the top view",
            "Draw a horizontal line and name it xy. The front view (FV) is drawn above xy, \
             the top view (TV) below it.",
        );

        seq.draw(RenderElement::projector(a_top, a_front))
            .draw(RenderElement::point(a_front, ViewTag::FrontView, Role::Given).labelled("a'"))
            .draw(RenderElement::point(a_top, ViewTag::TopView, Role::Given).labelled("a"))
            .step(
                "Locate end A",
                "a' above xy, a below xy, on one projector",
                format!(
                    "Draw a projector perpendicular to xy. End A is {} above HP, so mark a' {} \
                     above xy; it is {} in front of VP, so mark a {} below xy.",
                    mm(h),
                    mm(h),
                    mm(d),
                    mm(d)
                ),
            );

        seq.erase(ViewTag::TopView, "a")
            .draw(
                RenderElement::point(a_top, ViewTag::TopView, Role::Result)
                    .labelled("b(a)")
                    .ringed(),
            )
            .step(
                "Top view is a point",
                "both ends project to b(a)",
                format!(
                    "The line is perpendicular to HP, so both ends lie on one line of sight from \
                     above. The top view is a single point {} below xy: mark it b(a) and ring it.",
                    mm(d)
                ),
            );

        seq.draw(RenderElement::point(b_front, ViewTag::FrontView, Role::Result).labelled("b'"))
            .draw(
                RenderElement::line(a_front, b_front, ViewTag::FrontView, Role::TrueLength)
                    .labelled("a'b'"),
            )
            .draw(RenderElement::projector(a_front, b_front))
            .step(
                "Draw the front view",
                "a'b' is the true length",
                format!(
                    "The line is parallel to VP, so the front view shows its true length. Mark b' \
                     {} vertically above a' ({} above xy) and join a'b'.",
                    mm(tl),
                    mm(h + tl)
                ),
            );

        seq.draw(RenderElement::dimension(
            a_front,
            b_front,
            offset,
            format!("TL = {}", mm(tl)),
            ViewTag::FrontView,
        ))
        .draw(RenderElement::dimension(
            frame.foot(a_front),
            a_front,
            -offset,
            format!("h_A = {}", mm(h)),
            ViewTag::FrontView,
        ))
        .draw(RenderElement::dimension(
            a_top,
            frame.foot(a_top),
            -offset,
            format!("d_A = {}", mm(d)),
            ViewTag::TopView,
        ))
        .step(
            "Dimension the views",
            "front view = true length, top view = point",
            format!(
                "a'b' = {} is the true length (front view). The top view b(a) is a point {} below \
                 xy. End A is {} above HP and the upper end B is {} above HP.",
                mm(tl),
                mm(d),
                mm(h),
                mm(h + tl)
            ),
        );

        Ok(seq)
    }
}

/// Line perpendicular to VP.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerpendicularToVp;

impl CaseHandler for PerpendicularToVp {
    fn case_type(&self) -> CaseType {
        CaseType::PerpendicularToVp
    }

    fn step_count(&self) -> usize {
        5
    }

    fn required_slots(&self) -> &'static [SlotName] {
        REQUIRED
    }

    fn build(&self, c: &ConstraintSet, frame: &Frame) -> Result<StepSequence> {
        let inputs = Inputs::new(self.case_type(), c);
        let tl = inputs.true_length()?;
        let h = inputs.position(SlotName::HeightA)?;
        let d = inputs.position(SlotName::DistanceA)?;
        inputs.fixed(SlotName::Phi, 90.0)?;
        inputs.fixed(SlotName::Theta, 0.0)?;

        let a_front = frame.fv(0.0, h);
        let a_top = frame.tv(0.0, d);
        let b_top = frame.tv(0.0, d + tl);
        let offset = frame.dim_offset();
        let mut seq = StepSequence::new();

        seq.draw(frame.xy(0.0)).step(
            "Draw the reference line",
            "xy separates the front view from the top view",
            "Draw a horizontal line and name it xy. The front view (FV) is drawn above xy, \
             the top view (TV) below it.",
        );

        seq.draw(RenderElement::projector(a_top, a_front))
            .draw(RenderElement::point(a_front, ViewTag::FrontView, Role::Given).labelled("a'"))
            .draw(RenderElement::point(a_top, ViewTag::TopView, Role::Given).labelled("a"))
            .step(
                "Locate end A",
                "a' above xy, a below xy, on one projector",
                format!(
                    "Draw a projector perpendicular to xy. End A is {} above HP, so mark a' {} \
                     above xy; it is the end nearer VP, {} in front of it, so mark a {} below xy.",
                    mm(h),
                    mm(h),
                    mm(d),
                    mm(d)
                ),
            );

        seq.erase(ViewTag::FrontView, "a'")
            .draw(
                RenderElement::point(a_front, ViewTag::FrontView, Role::Result)
                    .labelled("b'(a')")
                    .ringed(),
            )
            .step(
                "Front view is a point",
                "both ends project to b'(a')",
                format!(
                    "The line is perpendicular to VP, so both ends lie on one line of sight from \
                     the front. The front view is a single point {} above xy: mark it b'(a') and \
                     ring it.",
                    mm(h)
                ),
            );

        seq.draw(RenderElement::point(b_top, ViewTag::TopView, Role::Result).labelled("b"))
            .draw(
                RenderElement::line(a_top, b_top, ViewTag::TopView, Role::TrueLength).labelled("ab"),
            )
            .draw(RenderElement::projector(b_top, a_top))
            .step(
                "Draw the top view",
                "ab is the true length",
                format!(
                    "The line is parallel to HP, so the top view shows its true length. End B is \
                     farther from VP: mark b {} vertically below a ({} below xy) and join ab.",
                    mm(tl),
                    mm(d + tl)
                ),
            );

        seq.draw(RenderElement::dimension(
            b_top,
            a_top,
            offset,
            format!("TL = {}", mm(tl)),
            ViewTag::TopView,
        ))
        .draw(RenderElement::dimension(
            frame.foot(a_front),
            a_front,
            -offset,
            format!("h_A = {}", mm(h)),
            ViewTag::FrontView,
        ))
        .draw(RenderElement::dimension(
            a_top,
            frame.foot(a_top),
            -offset,
            format!("d_A = {}", mm(d)),
            ViewTag::TopView,
        ))
        .step(
            "Dimension the views",
            "top view = true length, front view = point",
            format!(
                "ab = {} is the true length (top view). The front view b'(a') is a point {} above \
                 xy. End A is {} in front of VP and end B is {} in front of VP.",
                mm(tl),
                mm(h),
                mm(d),
                mm(d + tl)
            ),
        );

        Ok(seq)
    }
}
