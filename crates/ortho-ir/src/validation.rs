//! Outcome of validating a constraint set against its classified case.

use serde::{Deserialize, Serialize};

/// Errors, warnings and a one-line summary. Annotates a constraint set; never changes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `errors.is_empty()`.
    pub valid: bool,
    /// Violations, in the order they were found.
    pub errors: Vec<String>,
    /// Unusual but legal values.
    pub warnings: Vec<String>,
    /// Human-readable summary.
    pub summary: String,
}

impl ValidationResult {
    /// Build a result from accumulated findings.
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        let summary = match (errors.len(), warnings.len()) {
            (0, 0) => "constraints are consistent".to_string(),
            (0, w) => format!("constraints are consistent ({w} warning(s))"),
            (e, 0) => format!("{e} error(s): {}", errors[0]),
            (e, w) => format!("{e} error(s), {w} warning(s): {}", errors[0]),
        };
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            summary,
        }
    }

    /// A result with no findings.
    pub fn ok() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// A new result with `earlier` errors placed before this result's errors.
    pub fn preceded_by(self, earlier: Vec<String>) -> Self {
        if earlier.is_empty() {
            return self;
        }
        let errors = earlier.into_iter().chain(self.errors).collect();
        Self::new(errors, self.warnings)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_follows_errors() {
        assert!(ValidationResult::ok().valid);
        let r = ValidationResult::new(vec!["TL must be greater than 0".into()], vec![]);
        assert!(!r.valid);
        assert!(r.summary.contains("TL must be greater than 0"));
    }

    #[test]
    fn test_preceded_by_keeps_order() {
        let r = ValidationResult::new(vec!["second".into()], vec!["w".into()])
            .preceded_by(vec!["first".into()]);
        assert_eq!(r.errors, vec!["first", "second"]);
        assert_eq!(r.warnings, vec!["w"]);
        assert!(!r.valid);
    }
}
