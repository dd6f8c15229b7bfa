//! The interpreter's response contract.

use serde::{Deserialize, Serialize, Serializer};

use crate::case::{CaseClassification, CaseType, Completeness};
use crate::constraints::ConstraintSet;
use crate::slot::{Slot, Span};
use crate::validation::ValidationResult;

/// Why the normalizer rewrote part of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeReason {
    /// cm/m value rewritten in mm.
    UnitConversion,
    /// Alternate phrasing folded to its canonical form.
    Synonym,
    /// Symbol (°, θ, ⊥) spelled out.
    Symbol,
    /// Upper-case letters folded to lower case.
    CaseFold,
    /// Whitespace collapsed or inserted.
    Whitespace,
}

/// One rewrite performed by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationChange {
    /// Span in the original text.
    pub original_span: Span,
    /// Original text of the span.
    pub original: String,
    /// What it became.
    pub replacement: String,
    /// Why.
    pub reason: ChangeReason,
}

/// Text-level metadata of a parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseMetadata {
    /// Text as received.
    pub original_text: String,
    /// Text after normalization (empty if normalization failed).
    pub normalized_text: String,
    /// Rewrites, in text order.
    pub normalization_changes: Vec<NormalizationChange>,
}

/// A successful interpretation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    /// Case classification (`procId`, `caseType`, `slotsConsumed`, `completeness`).
    #[serde(flatten)]
    pub classification: CaseClassification,
    /// Resolved slot values.
    pub constraints: ConstraintSet,
    /// Validation outcome.
    pub validation: ValidationResult,
    /// Text metadata.
    pub metadata: ParseMetadata,
    /// Slots with provenance.
    pub slots: Vec<Slot>,
}

impl Interpretation {
    /// Classified case.
    pub fn case_type(&self) -> CaseType {
        self.classification.case_type
    }

    /// Completeness against the classified case.
    pub fn completeness(&self) -> &Completeness {
        &self.classification.completeness
    }

    /// Sufficient and valid: ready for step generation.
    pub fn is_actionable(&self) -> bool {
        self.classification.completeness.sufficient && self.validation.valid
    }
}

/// A request that could not be interpreted at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    /// What went wrong.
    pub error: String,
    /// Whatever text metadata was available.
    pub metadata: ParseMetadata,
}

/// Either an interpretation or a failure; serializes flat with a `success` flag.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    /// The pipeline ran to completion. Validation may still have found errors.
    Parsed(Interpretation),
    /// A stage fault stopped the pipeline.
    Failed(ParseFailure),
}

impl ParseResult {
    /// `true` for [`ParseResult::Parsed`].
    pub fn success(&self) -> bool {
        matches!(self, ParseResult::Parsed(_))
    }

    /// The interpretation, if the pipeline completed.
    pub fn interpretation(&self) -> Option<&Interpretation> {
        match self {
            ParseResult::Parsed(i) => Some(i),
            ParseResult::Failed(_) => None,
        }
    }

    /// The failure message, if the pipeline faulted.
    pub fn error(&self) -> Option<&str> {
        match self {
            ParseResult::Parsed(_) => None,
            ParseResult::Failed(f) => Some(&f.error),
        }
    }

    /// Text metadata.
    pub fn metadata(&self) -> &ParseMetadata {
        match self {
            ParseResult::Parsed(i) => &i.metadata,
            ParseResult::Failed(f) => &f.metadata,
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<Interpretation, ParseFailure> {
        match self {
            ParseResult::Parsed(i) => Ok(i),
            ParseResult::Failed(f) => Err(f),
        }
    }

    /// Serialize to a pretty JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<Result<Interpretation, ParseFailure>> for ParseResult {
    fn from(r: Result<Interpretation, ParseFailure>) -> Self {
        match r {
            Ok(i) => ParseResult::Parsed(i),
            Err(f) => ParseResult::Failed(f),
        }
    }
}

impl Serialize for ParseResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Parsed<'a> {
            success: bool,
            #[serde(flatten)]
            inner: &'a Interpretation,
        }

        #[derive(Serialize)]
        struct Failed<'a> {
            success: bool,
            error: &'a str,
            constraints: Option<()>,
            metadata: &'a ParseMetadata,
        }

        match self {
            ParseResult::Parsed(inner) => Parsed {
                success: true,
                inner,
            }
            .serialize(serializer),
            ParseResult::Failed(f) => Failed {
                success: false,
                error: &f.error,
                constraints: None,
                metadata: &f.metadata,
            }
            .serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::SlotName;

    fn parsed() -> ParseResult {
        ParseResult::Parsed(Interpretation {
            classification: CaseClassification::new(CaseType::PerpendicularToHp, 5, vec![]),
            constraints: ConstraintSet::new().with(SlotName::TrueLength, 70.0),
            validation: ValidationResult::ok(),
            metadata: ParseMetadata {
                original_text: "Line".into(),
                normalized_text: "line".into(),
                normalization_changes: vec![],
            },
            slots: vec![],
        })
    }

    #[test]
    fn test_parsed_wire_shape() {
        let json = serde_json::to_value(parsed()).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["procId"], "LINE-PERP-HP");
        assert_eq!(json["caseType"], "perpendicular_to_hp");
        assert_eq!(json["slotsConsumed"], 5);
        assert_eq!(json["constraints"]["TL"], 70.0);
        assert_eq!(json["completeness"]["sufficient"], true);
        assert_eq!(json["validation"]["valid"], true);
        assert_eq!(json["metadata"]["normalizedText"], "line");
        assert!(json["metadata"]["normalizationChanges"].is_array());
    }

    #[test]
    fn test_failed_wire_shape() {
        let failed = ParseResult::Failed(ParseFailure {
            error: "input is empty".into(),
            metadata: ParseMetadata::default(),
        });
        assert!(!failed.success());
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "input is empty");
        assert!(json["constraints"].is_null());
        assert!(json.as_object().unwrap().contains_key("constraints"));
    }

    #[test]
    fn test_into_result() {
        assert!(parsed().into_result().is_ok());
        assert_eq!(parsed().error(), None);
    }
}
