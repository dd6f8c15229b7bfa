//! Interpret and draw in one call.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use ortho_interpret::Interpreter;
use ortho_ir::{CaseType, ConstraintSet, Interpretation, ParseResult, SlotName, StepInstruction};
use ortho_steps::{generate_steps_with, StepError};

use crate::config::EngineConfig;

/// Why a problem text could not be turned into a step sequence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The text could not be interpreted at all.
    #[error("interpretation failed: {0}")]
    ParseFailed(String),

    /// The classified case lacks required slots.
    #[error("{case} is missing {}", names(.missing))]
    Insufficient {
        /// Classified case.
        case: CaseType,
        /// Absent slots.
        missing: Vec<SlotName>,
    },

    /// Validation found errors.
    #[error("constraints are invalid: {}", .0.join("; "))]
    Invalid(Vec<String>),

    /// Step generation failed.
    #[error(transparent)]
    Steps(#[from] StepError),
}

fn names(slots: &[SlotName]) -> String {
    slots
        .iter()
        .map(SlotName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// An interpretation together with its construction steps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    /// The successful interpretation.
    pub interpretation: Interpretation,
    /// Construction steps for the classified case.
    pub steps: Vec<StepInstruction>,
}

/// An interpreter and drawing settings built once from an [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    interpreter: Interpreter,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Create an engine.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            interpreter: config.interpreter(),
            config,
        }
    }

    /// Replace the interpreter, e.g. to register a disambiguation handler.
    pub fn with_interpreter(mut self, interpreter: Interpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Interpret a problem text.
    pub fn interpret(&self, text: &str) -> ParseResult {
        self.interpreter.interpret(text)
    }

    /// Generate steps for structured input.
    pub fn generate_steps(
        &self,
        case: CaseType,
        constraints: &ConstraintSet,
    ) -> Result<Vec<StepInstruction>, StepError> {
        generate_steps_with(case, constraints, &self.config.drawing)
    }

    /// Interpret `text` and, if the result is sufficient and valid, generate its steps.
    pub fn solve(&self, text: &str) -> Result<Solution, SolveError> {
        let interpretation = self
            .interpret(text)
            .into_result()
            .map_err(|f| SolveError::ParseFailed(f.error))?;

        let completeness = interpretation.completeness();
        if !completeness.sufficient {
            return Err(SolveError::Insufficient {
                case: interpretation.case_type(),
                missing: completeness.missing.clone(),
            });
        }
        if !interpretation.validation.valid {
            return Err(SolveError::Invalid(interpretation.validation.errors.clone()));
        }

        let steps = self.generate_steps(interpretation.case_type(), &interpretation.constraints)?;
        debug!(case = %interpretation.case_type(), steps = steps.len(), "solved");
        Ok(Solution {
            interpretation,
            steps,
        })
    }
}

/// Interpret `text` and generate its steps with `config`.
pub fn solve(text: &str, config: &EngineConfig) -> Result<Solution, SolveError> {
    Engine::new(*config).solve(text)
}
