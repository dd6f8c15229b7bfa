#![warn(missing_docs)]

//! Step-by-step construction sequences for orthographic projections of a line.
//!
//! Given a case and a resolved [`ConstraintSet`], produces the fixed list of
//! [`StepInstruction`]s a student follows to draw the front and top views:
//!
//! | case | steps |
//! |---|---|
//! | perpendicular to HP | 5 |
//! | perpendicular to VP | 5 |
//! | inclined to HP, parallel to VP | 5 |
//! | inclined to VP, parallel to HP | 5 |
//! | inclined to both | 7 |
//!
//! Each step carries every element drawn so far, so a renderer can show any
//! step on its own.
//!
//! # Example
//!
//! ```
//! use ortho_ir::{CaseType, ConstraintSet, SlotName};
//! use ortho_steps::generate_steps;
//!
//! let c = ConstraintSet::new()
//!     .with(SlotName::TrueLength, 70.0)
//!     .with(SlotName::HeightA, 10.0)
//!     .with(SlotName::DistanceA, 15.0);
//! let steps = generate_steps(CaseType::PerpendicularToHp, &c).unwrap();
//! assert_eq!(steps.len(), 5);
//! ```

pub mod cases;
pub mod config;
pub mod error;
pub mod sequence;

pub use cases::{handler_for, step_count, CaseHandler};
pub use config::DrawingConfig;
pub use error::{Result, StepError};
pub use sequence::{Frame, StepSequence};

use ortho_ir::{CaseType, ConstraintSet, StepInstruction};
use tracing::debug;

/// Generate the step sequence for `case` with the default drawing settings.
pub fn generate_steps(case: CaseType, constraints: &ConstraintSet) -> Result<Vec<StepInstruction>> {
    generate_steps_with(case, constraints, &DrawingConfig::default())
}

/// Generate the step sequence for `case` with explicit drawing settings.
pub fn generate_steps_with(
    case: CaseType,
    constraints: &ConstraintSet,
    config: &DrawingConfig,
) -> Result<Vec<StepInstruction>> {
    config.validate()?;
    let handler = handler_for(case).ok_or(StepError::UnsupportedCase(case))?;
    if let Some(&slot) = handler
        .required_slots()
        .iter()
        .find(|&&slot| constraints.get(slot).is_none())
    {
        return Err(StepError::MissingSlot { case, slot });
    }
    let steps = handler.build(constraints, &Frame::new(config))?.finish();
    debug_assert_eq!(steps.len(), handler.step_count());
    debug!(case = %case, steps = steps.len(), scale = config.scale, "generated step sequence");
    Ok(steps)
}
