//! Error types for the interpreter stages.

use thiserror::Error;

use crate::extract::{Ambiguity, Extraction};

/// Errors raised by the normalizer. Fatal to the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    /// Input is empty or whitespace only.
    #[error("input is empty")]
    Empty,

    /// Input contains a character the tokenizer cannot read.
    #[error("unparseable input: control character U+{code:04X} at byte {position}")]
    ControlCharacter {
        /// Byte offset in the original text.
        position: usize,
        /// Code point.
        code: u32,
    },
}

impl NormalizationError {
    /// Create a control character error.
    pub fn control(position: usize, ch: char) -> Self {
        Self::ControlCharacter {
            position,
            code: ch as u32,
        }
    }
}

/// Two or more equally specific patterns filled the same slot with different values.
///
/// Recoverable: `partial` holds every unambiguous slot, and the caller can
/// pick a candidate per ambiguity and finish the extraction.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("ambiguous {}", describe(.ambiguities))]
pub struct ExtractionAmbiguityError {
    /// Extraction without the ambiguous slots and before implications are applied.
    pub partial: Extraction,
    /// One entry per ambiguous slot.
    pub ambiguities: Vec<Ambiguity>,
}

fn describe(ambiguities: &[Ambiguity]) -> String {
    ambiguities
        .iter()
        .map(Ambiguity::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Stage faults that stop the pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpretError {
    /// Normalization failed.
    #[error(transparent)]
    Normalization(#[from] NormalizationError),
}

/// Result type for interpreter operations.
pub type Result<T> = std::result::Result<T, InterpretError>;
