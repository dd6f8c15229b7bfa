#![warn(missing_docs)]

//! ortho: descriptive-geometry line problems, from text to construction steps.
//!
//! - [`interpret`] turns problem text into a classified, validated [`ParseResult`]
//! - [`generate_steps`] turns a case and a [`ConstraintSet`] into [`StepInstruction`]s
//! - [`solve`] does both, with settings from an [`EngineConfig`]
//!
//! # Example
//!
//! ```
//! use ortho::{solve, EngineConfig};
//!
//! let text = "line perpendicular to HP, length 70, lower end 10 above HP, 15 in front of VP";
//! let solution = solve(text, &EngineConfig::default()).unwrap();
//! assert_eq!(solution.steps.len(), 5);
//! assert!(solution.steps[4].is_final());
//! ```

pub mod config;
pub mod solve;

pub use config::{ConfigError, EngineConfig, ValidationConfig};
pub use solve::{solve, Engine, SolveError, Solution};

pub use ortho_interpret::{interpret, Ambiguity, Disambiguator, Interpreter};
pub use ortho_ir::{
    CaseClassification, CaseType, Completeness, ConstraintSet, Interpretation, ParseResult,
    Point2D, RenderElement, Role, Slot, SlotName, StepInstruction, ValidationResult, ViewTag,
};
pub use ortho_steps::{generate_steps, generate_steps_with, DrawingConfig, StepError};

pub use ortho_interpret;
pub use ortho_ir;
pub use ortho_steps;
