#![warn(missing_docs)]

//! Shared data model for the ortho line-projection engine.
//!
//! Everything that crosses a crate boundary lives here: slot names and
//! provenance, the [`ConstraintSet`], case classification and validation
//! results, the [`ParseResult`] returned by the interpreter, and the
//! [`StepInstruction`]/[`RenderElement`] sequence consumed by a renderer.
//!
//! All types serialize with the wire names a rendering client expects
//! (`procId`, `caseType`, `slotsConsumed`, `renderElements`, ...).

pub mod case;
pub mod constraints;
pub mod drawing;
pub mod format;
pub mod parse;
pub mod slot;
pub mod validation;

pub use case::{CaseClassification, CaseType, Completeness, UnknownCase};
pub use constraints::ConstraintSet;
pub use drawing::{LocusPath, Point2D, RenderElement, Role, StepInstruction, ViewTag};
pub use parse::{
    ChangeReason, Interpretation, NormalizationChange, ParseFailure, ParseMetadata, ParseResult,
};
pub use slot::{Slot, SlotName, SlotSource, Span, Unit};
pub use validation::ValidationResult;
