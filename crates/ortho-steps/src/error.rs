//! Error types for step generation.

use ortho_ir::{CaseType, SlotName};
use thiserror::Error;

/// Errors that can occur while generating a step sequence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepError {
    /// The case has no construction procedure.
    #[error("no construction procedure for case '{0}'")]
    UnsupportedCase(CaseType),

    /// A slot the construction needs is absent.
    #[error("{case} needs {slot} ({})", .slot.description())]
    MissingSlot {
        /// Case being constructed.
        case: CaseType,
        /// Absent slot.
        slot: SlotName,
    },

    /// A slot value the construction cannot draw.
    #[error("{slot} = {value} cannot be drawn as {case}: {reason}")]
    OutOfRange {
        /// Case being constructed.
        case: CaseType,
        /// Offending slot.
        slot: SlotName,
        /// Its value.
        value: f64,
        /// What the construction needs instead.
        reason: String,
    },

    /// Invalid drawing settings.
    #[error("invalid drawing settings: {0}")]
    InvalidConfig(String),
}

impl StepError {
    /// Create an out-of-range error.
    pub fn out_of_range(case: CaseType, slot: SlotName, value: f64, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            case,
            slot,
            value,
            reason: reason.into(),
        }
    }
}

/// Result type for step generation.
pub type Result<T> = std::result::Result<T, StepError>;
