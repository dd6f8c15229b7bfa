//! Line inclined to both HP and VP: rotate-and-project construction.
//!
//! 1. xy, end A in both views
//! 2. Trial parallel to VP: a'b1' = TL at θ; b1 gives the top-view length, b1' the locus of b'
//! 3. Trial parallel to HP: ab2 = TL at φ; b2' gives the front-view length, b2 the locus of b
//! 4. Swing ab1 about a onto the locus of b
//! 5. Swing a'b2' about a' onto the locus of b'
//! 6. b and b' share a projector
//! 7. Dimensions: TL, θ, φ and the apparent angles α (front view) and β (top view)

use ortho_ir::format::{deg, mm, rounded};
use ortho_ir::{CaseType, ConstraintSet, RenderElement, Role, SlotName, ViewTag};

use super::{CaseHandler, Inputs};
use crate::error::{Result, StepError};
use crate::sequence::{bearing, swing, Frame, StepSequence};

const REQUIRED: &[SlotName] = &[
    SlotName::TrueLength,
    SlotName::Theta,
    SlotName::Phi,
    SlotName::HeightA,
    SlotName::DistanceA,
];

/// Line inclined at θ to HP and φ to VP.
#[derive(Debug, Clone, Copy, Default)]
pub struct InclinedToBoth;

impl CaseHandler for InclinedToBoth {
    fn case_type(&self) -> CaseType {
        CaseType::InclinedToBoth
    }

    fn step_count(&self) -> usize {
        7
    }

    fn required_slots(&self) -> &'static [SlotName] {
        REQUIRED
    }

    fn build(&self, c: &ConstraintSet, frame: &Frame) -> Result<StepSequence> {
        let inputs = Inputs::new(self.case_type(), c);
        let tl = inputs.true_length()?;
        let theta = inputs.oblique(SlotName::Theta)?;
        let phi = inputs.oblique(SlotName::Phi)?;
        if theta + phi > 90.0 + 1e-9 {
            return Err(StepError::out_of_range(
                self.case_type(),
                SlotName::Phi,
                phi,
                format!("theta + phi must not exceed 90° (theta = {})", deg(theta)),
            ));
        }
        let h = inputs.position(SlotName::HeightA)?;
        let d = inputs.position(SlotName::DistanceA)?;

        let (sin_t, cos_t) = theta.to_radians().sin_cos();
        let (sin_p, cos_p) = phi.to_radians().sin_cos();
        let h_rise = tl * sin_t;
        let d_rise = tl * sin_p;
        let top_len = tl * cos_t;
        let front_len = tl * cos_p;
        let run = (tl * tl - h_rise * h_rise - d_rise * d_rise).max(0.0).sqrt();
        let extent = top_len.max(front_len);

        let a_front = frame.fv(0.0, h);
        let a_top = frame.tv(0.0, d);
        let b1_front = frame.fv(top_len, h + h_rise);
        let b1_top = frame.tv(top_len, d);
        let b2_top = frame.tv(front_len, d + d_rise);
        let b2_front = frame.fv(front_len, h);

        // Swing the trial views about end A until they reach the loci.
        let beta = d_rise.atan2(run);
        let alpha = h_rise.atan2(run);
        let b_top = swing(a_top, b1_top, -beta);
        let b_front = swing(a_front, b2_front, alpha);
        let (alpha, beta) = (alpha.to_degrees(), beta.to_degrees());

        let offset = frame.dim_offset();
        let s = frame.scale();
        let mut seq = StepSequence::new();

        seq.draw(frame.xy(extent))
            .draw(RenderElement::projector(a_top, a_front))
            .draw(RenderElement::point(a_front, ViewTag::FrontView, Role::Given).labelled("a'"))
            .draw(RenderElement::point(a_top, ViewTag::TopView, Role::Given).labelled("a"))
            .step(
                "Draw xy and locate end A",
                "a' above xy, a below xy, on one projector",
                format!(
                    "Draw the reference line xy and a projector perpendicular to it. Mark a' {} \
                     above xy (end A is {} above HP) and a {} below xy (end A is {} in front of VP).",
                    mm(h),
                    mm(h),
                    mm(d),
                    mm(d)
                ),
            );

        seq.draw(
            RenderElement::line(a_front, b1_front, ViewTag::FrontView, Role::TrueLength)
                .labelled("a'b1'"),
        )
        .draw(RenderElement::point(b1_front, ViewTag::FrontView, Role::Construction).labelled("b1'"))
        .draw(RenderElement::label(
            a_front,
            format!("θ = {}", deg(theta)),
            ViewTag::FrontView,
        ))
        .draw(RenderElement::projector(b1_front, b1_top))
        .draw(RenderElement::point(b1_top, ViewTag::TopView, Role::Construction).labelled("b1"))
        .draw(
            RenderElement::line(a_top, b1_top, ViewTag::TopView, Role::Construction)
                .labelled("ab1"),
        )
        .draw(frame.locus_through(b1_front, extent, ViewTag::FrontView).labelled("locus of b'"))
        .step(
            "Assume the line parallel to VP",
            format!("a'b1' = TL at {} gives the top-view length", deg(theta)),
            format!(
                "Draw a'b1' = {} at {} to xy. Project b1' down to b1 on the horizontal through a. \
                 ab1 = TL·cos θ = {} mm is the length of the top view. End B stays {} mm above \
                 end A whatever the rotation, so b' lies on the horizontal through b1': the locus \
                 of b'.",
                mm(tl),
                deg(theta),
                rounded(top_len, 2),
                rounded(h_rise, 2)
            ),
        );

        seq.draw(
            RenderElement::line(a_top, b2_top, ViewTag::TopView, Role::TrueLength).labelled("ab2"),
        )
        .draw(RenderElement::point(b2_top, ViewTag::TopView, Role::Construction).labelled("b2"))
        .draw(RenderElement::label(
            a_top,
            format!("φ = {}", deg(phi)),
            ViewTag::TopView,
        ))
        .draw(RenderElement::projector(b2_top, b2_front))
        .draw(RenderElement::point(b2_front, ViewTag::FrontView, Role::Construction).labelled("b2'"))
        .draw(
            RenderElement::line(a_front, b2_front, ViewTag::FrontView, Role::Construction)
                .labelled("a'b2'"),
        )
        .draw(frame.locus_through(b2_top, extent, ViewTag::TopView).labelled("locus of b"))
        .step(
            "Assume the line parallel to HP",
            format!("ab2 = TL at {} gives the front-view length", deg(phi)),
            format!(
                "Draw ab2 = {} at {} to xy. Project b2 up to b2' on the horizontal through a'. \
                 a'b2' = TL·cos φ = {} mm is the length of the front view. b lies on the \
                 horizontal through b2, {} mm farther from xy than a: the locus of b.",
                mm(tl),
                deg(phi),
                rounded(front_len, 2),
                rounded(d_rise, 2)
            ),
        );

        seq.draw(
            RenderElement::locus_arc(a_top, s * top_len, 0.0, bearing(a_top, b_top), ViewTag::TopView)
                .labelled("arc ab1"),
        )
        .draw(RenderElement::point(b_top, ViewTag::TopView, Role::Result).labelled("b"))
        .draw(RenderElement::line(a_top, b_top, ViewTag::TopView, Role::Result).labelled("ab"))
        .step(
            "Swing the top view",
            "ab1 rotated about a onto the locus of b",
            format!(
                "With centre a and radius ab1 = {} mm, swing b1 until it cuts the locus of b. \
                 The intersection is b, and ab is the top view, at β = {} to xy.",
                rounded(top_len, 2),
                deg_rounded(beta)
            ),
        );

        seq.draw(
            RenderElement::locus_arc(
                a_front,
                s * front_len,
                0.0,
                bearing(a_front, b_front),
                ViewTag::FrontView,
            )
            .labelled("arc a'b2'"),
        )
        .draw(RenderElement::point(b_front, ViewTag::FrontView, Role::Result).labelled("b'"))
        .draw(
            RenderElement::line(a_front, b_front, ViewTag::FrontView, Role::Result).labelled("a'b'"),
        )
        .step(
            "Swing the front view",
            "a'b2' rotated about a' onto the locus of b'",
            format!(
                "With centre a' and radius a'b2' = {} mm, swing b2' until it cuts the locus of b'. \
                 The intersection is b', and a'b' is the front view, at α = {} to xy.",
                rounded(front_len, 2),
                deg_rounded(alpha)
            ),
        );

        seq.draw(RenderElement::projector(b_top, b_front))
            .draw(RenderElement::label(
                a_front,
                format!("α = {}", deg_rounded(alpha)),
                ViewTag::FrontView,
            ))
            .draw(RenderElement::label(
                a_top,
                format!("β = {}", deg_rounded(beta)),
                ViewTag::TopView,
            ))
            .step(
                "Join and check the projector",
                "b and b' lie on one projector",
                format!(
                    "Join b and b'. The join must be perpendicular to xy: both ends of the \
                     projector are {} mm to the right of a's projector. If they are not, recheck \
                     the arcs.",
                    rounded(run, 2)
                ),
            );

        seq.draw(RenderElement::dimension(
            a_front,
            b1_front,
            offset,
            format!("TL = {}", mm(tl)),
            ViewTag::FrontView,
        ))
        .draw(RenderElement::dimension(
            a_front,
            b_front,
            -offset,
            format!("a'b' = {} mm", rounded(front_len, 2)),
            ViewTag::FrontView,
        ))
        .draw(RenderElement::dimension(
            a_top,
            b_top,
            offset,
            format!("ab = {} mm", rounded(top_len, 2)),
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
            "Dimension the result",
            "a'b' and ab are the required views",
            format!(
                "a'b' = {} mm (front view, α = {}) and ab = {} mm (top view, β = {}) are the \
                 projections of the line of true length {} inclined at θ = {} to HP and \
                 φ = {} to VP.",
                rounded(front_len, 2),
                deg_rounded(alpha),
                rounded(top_len, 2),
                deg_rounded(beta),
                mm(tl),
                deg(theta),
                deg(phi)
            ),
        );

        Ok(seq)
    }
}

fn deg_rounded(v: f64) -> String {
    format!("{}°", rounded(v, 2))
}
