//! Per-case construction procedures.
//!
//! Each case is a [`CaseHandler`] with a fixed step template. The table of
//! handlers is static and read-only.

mod inclined_both;
mod inclined_one;
mod perpendicular;

pub use inclined_both::InclinedToBoth;
pub use inclined_one::{InclinedToHp, InclinedToVp};
pub use perpendicular::{PerpendicularToHp, PerpendicularToVp};

use ortho_ir::{CaseType, ConstraintSet, SlotName};

use crate::error::{Result, StepError};
use crate::sequence::{Frame, StepSequence};

/// A fixed construction procedure for one case.
pub trait CaseHandler: Send + Sync {
    /// Case this handler draws.
    fn case_type(&self) -> CaseType;

    /// Number of steps the procedure always produces.
    fn step_count(&self) -> usize;

    /// Slots that must be supplied.
    fn required_slots(&self) -> &'static [SlotName];

    /// Build the step sequence. Every coordinate is a function of `c` and `frame` only.
    fn build(&self, c: &ConstraintSet, frame: &Frame) -> Result<StepSequence>;
}

static HANDLERS: [&dyn CaseHandler; 5] = [
    &PerpendicularToHp,
    &PerpendicularToVp,
    &InclinedToHp,
    &InclinedToVp,
    &InclinedToBoth,
];

/// The handler for `case`, if it has one.
pub fn handler_for(case: CaseType) -> Option<&'static dyn CaseHandler> {
    HANDLERS.iter().copied().find(|h| h.case_type() == case)
}

/// Number of steps generated for `case`, if it has a procedure.
pub fn step_count(case: CaseType) -> Option<usize> {
    handler_for(case).map(|h| h.step_count())
}

const EPS: f64 = 1e-9;

/// Reads and range-checks slot values for one case.
pub(crate) struct Inputs<'a> {
    case: CaseType,
    c: &'a ConstraintSet,
}

impl<'a> Inputs<'a> {
    pub(crate) fn new(case: CaseType, c: &'a ConstraintSet) -> Self {
        Self { case, c }
    }

    fn require(&self, slot: SlotName) -> Result<f64> {
        self.c.get(slot).ok_or(StepError::MissingSlot {
            case: self.case,
            slot,
        })
    }

    /// True length, strictly positive.
    pub(crate) fn true_length(&self) -> Result<f64> {
        let tl = self.require(SlotName::TrueLength)?;
        if tl.is_finite() && tl > 0.0 {
            Ok(tl)
        } else {
            Err(StepError::out_of_range(
                self.case,
                SlotName::TrueLength,
                tl,
                "the true length must be greater than 0",
            ))
        }
    }

    /// Height or distance of end A, zero or positive.
    pub(crate) fn position(&self, slot: SlotName) -> Result<f64> {
        let v = self.require(slot)?;
        if v.is_finite() && v >= 0.0 {
            Ok(v)
        } else {
            Err(StepError::out_of_range(
                self.case,
                slot,
                v,
                "end A must not lie below HP or behind VP",
            ))
        }
    }

    /// An inclination strictly between 0° and 90°.
    pub(crate) fn oblique(&self, slot: SlotName) -> Result<f64> {
        let v = self.require(slot)?;
        if v > EPS && v < 90.0 - EPS {
            Ok(v)
        } else {
            Err(StepError::out_of_range(
                self.case,
                slot,
                v,
                "the inclination must be strictly between 0° and 90°",
            ))
        }
    }

    /// An inclination fixed by the case; if supplied it must equal `want`.
    pub(crate) fn fixed(&self, slot: SlotName, want: f64) -> Result<f64> {
        match self.c.get(slot) {
            Some(v) if (v - want).abs() > EPS => Err(StepError::out_of_range(
                self.case,
                slot,
                v,
                format!("{} fixes {slot} at {want}°", self.case.description()),
            )),
            _ => Ok(want),
        }
    }
}
