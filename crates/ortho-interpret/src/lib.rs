#![warn(missing_docs)]

//! Problem-text interpreter for orthographic line-projection problems.
//!
//! Turns a sentence such as "line perpendicular to HP, length 70, lower end
//! 10 above HP, 15 in front of VP" into a classified, validated
//! [`ConstraintSet`](ortho_ir::ConstraintSet) wrapped in a
//! [`ParseResult`](ortho_ir::ParseResult).
//!
//! # Example
//!
//! ```
//! use ortho_interpret::interpret;
//! use ortho_ir::CaseType;
//!
//! let result = interpret("line perpendicular to HP, length 70, lower end 10 above HP, 15 in front of VP");
//! let i = result.interpretation().unwrap();
//! assert_eq!(i.case_type(), CaseType::PerpendicularToHp);
//! assert!(i.completeness().sufficient);
//! ```

pub mod classify;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod orchestrate;
pub mod validate;

use std::sync::LazyLock;

pub use classify::Classifier;
pub use error::{ExtractionAmbiguityError, InterpretError, NormalizationError, Result};
pub use extract::{Ambiguity, Candidate, Extraction, Extractor, Marker, Orientation};
pub use normalize::{Normalized, Normalizer};
pub use orchestrate::{Disambiguator, Interpreter};
pub use validate::Validator;

use ortho_ir::ParseResult;

static DEFAULT: LazyLock<Interpreter> = LazyLock::new(Interpreter::new);

/// Interpret `text` with the default pipeline and no disambiguation handler.
pub fn interpret(text: &str) -> ParseResult {
    DEFAULT.interpret(text)
}
