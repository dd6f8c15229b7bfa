//! Pipeline orchestration.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, debug_span, warn};

use ortho_ir::{Interpretation, ParseFailure, ParseMetadata, ParseResult};

use crate::classify::Classifier;
use crate::error::{ExtractionAmbiguityError, Result};
use crate::extract::{Ambiguity, Extraction, Extractor, Orientation};
use crate::normalize::{Normalized, Normalizer};
use crate::validate::Validator;

/// Picks one candidate for an ambiguous slot.
///
/// Registered once on an [`Interpreter`] and only consulted when the
/// extractor reports an ambiguity.
pub trait Disambiguator: Send + Sync {
    /// Index into `ambiguity.candidates`, or `None` to leave the slot unresolved.
    fn choose(&self, ambiguity: &Ambiguity, normalized_text: &str) -> Option<usize>;
}

impl<F> Disambiguator for F
where
    F: Fn(&Ambiguity, &str) -> Option<usize> + Send + Sync,
{
    fn choose(&self, ambiguity: &Ambiguity, normalized_text: &str) -> Option<usize> {
        self(ambiguity, normalized_text)
    }
}

/// Runs normalize, extract, classify and validate in sequence.
///
/// Holds only immutable stage configuration, so one instance can serve
/// any number of calls, from any number of threads.
#[derive(Clone, Default)]
pub struct Interpreter {
    normalizer: Normalizer,
    extractor: Extractor,
    classifier: Classifier,
    validator: Validator,
    disambiguator: Option<Arc<dyn Disambiguator>>,
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("validator", &self.validator)
            .field("disambiguator", &self.disambiguator.is_some())
            .finish()
    }
}

impl Interpreter {
    /// Interpreter with default stages and no disambiguation handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the validator.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Register the disambiguation handler.
    pub fn with_disambiguator(mut self, handler: impl Disambiguator + 'static) -> Self {
        self.disambiguator = Some(Arc::new(handler));
        self
    }

    /// Interpret `text`. Stage faults become `ParseResult::Failed`.
    pub fn interpret(&self, text: &str) -> ParseResult {
        let span = debug_span!("interpret", chars = text.chars().count());
        let _enter = span.enter();

        match self.run(text) {
            Ok(interpretation) => ParseResult::Parsed(interpretation),
            Err(e) => {
                debug!(error = %e, "interpretation failed");
                ParseResult::Failed(ParseFailure {
                    error: e.to_string(),
                    metadata: ParseMetadata {
                        original_text: text.to_string(),
                        ..ParseMetadata::default()
                    },
                })
            }
        }
    }

    /// Interpret `text`, returning stage faults as errors.
    pub fn run(&self, text: &str) -> Result<Interpretation> {
        let normalized = self.normalizer.normalize(text)?;
        debug!(
            tokens = normalized.token_count(),
            changes = normalized.changes.len(),
            "normalized"
        );

        let (extraction, unresolved) = match self.extractor.extract(&normalized) {
            Ok(extraction) => (extraction, Vec::new()),
            Err(ambiguous) => self.resolve(ambiguous, &normalized),
        };
        debug!(
            slots = extraction.slots.len(),
            markers = extraction.markers.len(),
            "extracted"
        );

        let constraints = extraction.constraints();
        let orientations: Vec<Orientation> =
            extraction.markers.iter().map(|m| m.orientation).collect();
        let classification = self.classifier.classify(&constraints, &orientations);
        debug!(
            case = %classification.case_type,
            consumed = classification.slots_consumed,
            sufficient = classification.completeness.sufficient,
            "classified"
        );

        let earlier: Vec<String> = unresolved
            .iter()
            .map(|a| format!("ambiguous {a}; no disambiguation handler chose a value"))
            .chain(extraction.conflicts.iter().cloned())
            .collect();
        let validation = self
            .validator
            .validate(&constraints, &classification)
            .preceded_by(earlier);
        debug!(
            errors = validation.errors.len(),
            warnings = validation.warnings.len(),
            "validated"
        );

        let Extraction { slots, .. } = extraction;
        let Normalized {
            original,
            text,
            changes,
            ..
        } = normalized;
        Ok(Interpretation {
            classification,
            constraints,
            validation,
            metadata: ParseMetadata {
                original_text: original,
                normalized_text: text,
                normalization_changes: changes,
            },
            slots,
        })
    }

    fn resolve(
        &self,
        ambiguous: ExtractionAmbiguityError,
        normalized: &Normalized,
    ) -> (Extraction, Vec<Ambiguity>) {
        let ExtractionAmbiguityError {
            partial,
            ambiguities,
        } = ambiguous;
        let mut chosen = Vec::new();
        let mut unresolved = Vec::new();
        for ambiguity in ambiguities {
            let pick = self
                .disambiguator
                .as_ref()
                .and_then(|d| d.choose(&ambiguity, &normalized.text))
                .and_then(|i| ambiguity.resolve(i));
            match pick {
                Some(slot) => {
                    debug!(slot = %slot.name, value = slot.value, "ambiguity resolved");
                    chosen.push(slot);
                }
                None => {
                    warn!(
                        slot = %ambiguity.slot,
                        candidates = ambiguity.candidates.len(),
                        "unresolved ambiguity"
                    );
                    unresolved.push(ambiguity);
                }
            }
        }
        (self.extractor.finish(partial, chosen), unresolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ortho_ir::{CaseType, SlotName};

    const PERP_HP: &str =
        "line perpendicular to HP, length 70, lower end 10 above HP, 15 in front of VP";

    #[test]
    fn test_complete_perpendicular_problem() {
        let result = Interpreter::new().interpret(PERP_HP);
        assert!(result.success());
        let i = result.interpretation().unwrap();
        assert_eq!(i.case_type(), CaseType::PerpendicularToHp);
        assert_eq!(i.classification.proc_id, "LINE-PERP-HP");
        assert_eq!(i.classification.slots_consumed, 5);
        assert!(i.completeness().sufficient);
        assert!(i.validation.valid, "{:?}", i.validation.errors);
        assert!(i.is_actionable());
        assert_eq!(i.constraints.get(SlotName::TrueLength), Some(70.0));
        assert_eq!(i.metadata.original_text, PERP_HP);
        assert!(i.metadata.normalized_text.starts_with("line perpendicular to hp"));
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(Interpreter::new().interpret(PERP_HP)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["procId"], "LINE-PERP-HP");
        assert_eq!(json["caseType"], "perpendicular_to_hp");
        assert_eq!(json["slotsConsumed"], 5);
        assert_eq!(json["constraints"]["h_A"], 10.0);
        assert_eq!(json["constraints"]["d_A"], 15.0);
        assert!(json["constraints"]["h_B"].is_null());
        assert_eq!(json["completeness"]["missing"], serde_json::json!([]));
        assert_eq!(json["validation"]["valid"], true);
        assert!(!json["metadata"]["normalizationChanges"]
            .as_array()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_empty_input_is_a_failed_result() {
        let result = Interpreter::new().interpret("   ");
        assert!(!result.success());
        assert_eq!(result.error(), Some("input is empty"));
        assert_eq!(result.metadata().original_text, "   ");
    }

    #[test]
    fn test_malformed_constraints_are_still_parsed() {
        let result = Interpreter::new()
            .interpret("line perpendicular to hp, length 0, end a 5 below hp, 15 in front of vp");
        assert!(result.success());
        let i = result.interpretation().unwrap();
        assert!(!i.validation.valid);
        assert!(i.validation.errors.len() >= 2);
    }

    #[test]
    fn test_negative_height_is_rejected() {
        let i = Interpreter::new()
            .interpret("line perpendicular to HP, length 70, lower end -5 mm above HP, 15 in front of VP")
            .into_result()
            .unwrap();
        assert_eq!(i.constraints.get(SlotName::HeightA), Some(-5.0));
        assert!(!i.validation.valid);
        assert!(i.validation.errors.iter().any(|e| e.starts_with("h_A must not be negative")));
    }

    #[test]
    fn test_unusual_text_never_panics() {
        for text in [
            "30°",
            "inclined at 30° to HP",
            "45º to VP, 30θ",
            "line 70 mm long at 30° to HP",
            "length 70.",
            ".",
            "5.",
            "-",
            "−",
            "- 5 above hp",
            "−5 above hp",
            "20-30 mm",
            "1.2.3 cm",
            "tl = -0 m",
            "h_A = −0.5 cm, d_A = 1e3",
            "⊥ ∥ ° º θ φ",
            "end a 10 above hp and 15 in front of vp, end b 10 above hp",
            "tl 10, end a 0 above hp, end b 50 above hp",
            "ü 5ü ü5 😀 5😀",
            "line\u{7}",
        ] {
            let result = Interpreter::new().interpret(text);
            assert_eq!(result.metadata().original_text, text);
        }
    }

    #[test]
    fn test_incomplete_problem_reports_missing() {
        let result = Interpreter::new().interpret("a line perpendicular to VP, 50 mm long");
        let i = result.interpretation().unwrap();
        assert_eq!(i.case_type(), CaseType::PerpendicularToVp);
        assert!(!i.completeness().sufficient);
        assert_eq!(
            i.completeness().missing,
            vec![SlotName::HeightA, SlotName::DistanceA]
        );
        assert!(!i.is_actionable());
    }

    #[test]
    fn test_ambiguity_without_handler_is_validation_error() {
        let text = "perpendicular to hp, length 70, length 80, end a 10 above hp and 15 in front of vp";
        let i = Interpreter::new().interpret(text).into_result().unwrap();
        assert!(!i.validation.valid);
        assert!(i.validation.errors[0].starts_with("ambiguous TL"));
        assert_eq!(i.constraints.get(SlotName::TrueLength), None);
    }

    #[test]
    fn test_ambiguity_with_handler() {
        let text = "perpendicular to hp, length 70, length 80, end a 10 above hp and 15 in front of vp";
        let interpreter = Interpreter::new().with_disambiguator(|a: &Ambiguity, _: &str| {
            a.candidates.iter().position(|c| c.value == 80.0)
        });
        let i = interpreter.interpret(text).into_result().unwrap();
        assert!(i.validation.valid, "{:?}", i.validation.errors);
        assert_eq!(i.constraints.get(SlotName::TrueLength), Some(80.0));
    }

    #[test]
    fn test_calls_are_independent() {
        let interpreter = Interpreter::new();
        let first = interpreter.interpret(PERP_HP);
        interpreter.interpret("theta 30, phi 45, tl 80");
        assert_eq!(interpreter.interpret(PERP_HP), first);
    }

    #[test]
    fn test_general_case_from_text() {
        let i = Interpreter::new()
            .interpret("Line AB, TL = 80 mm, θ = 30°, φ = 45°, end A 10 mm above HP and 15 mm in front of VP")
            .into_result()
            .unwrap();
        assert_eq!(i.case_type(), CaseType::InclinedToBoth);
        assert!(i.is_actionable());
    }
}
