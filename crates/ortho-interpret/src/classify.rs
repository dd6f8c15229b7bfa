//! Case classifier.

use ortho_ir::{CaseClassification, CaseType, ConstraintSet, SlotName};

use crate::extract::Orientation;

const EPS: f64 = 1e-9;

fn is(value: Option<f64>, target: f64) -> bool {
    value.is_some_and(|v| (v - target).abs() < EPS)
}

fn is_oblique(value: Option<f64>) -> bool {
    value.is_some_and(|v| v > EPS && v < 90.0 - EPS)
}

/// Assigns exactly one case to a constraint set. Pure.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier;

impl Classifier {
    /// Create a classifier.
    pub fn new() -> Self {
        Self
    }

    /// Classify `constraints`, taking stated orientations into account.
    ///
    /// Rules in priority order:
    ///
    /// 1. θ = 90 or "perpendicular to HP": perpendicular to HP
    /// 2. φ = 90 or "perpendicular to VP": perpendicular to VP
    /// 3. θ and φ both strictly between 0 and 90: inclined to both
    /// 4. θ strictly between 0 and 90 and φ = 0: inclined to HP, parallel to VP
    /// 5. φ strictly between 0 and 90 and θ = 0: inclined to VP, parallel to HP
    /// 6. anything else: indeterminate
    pub fn classify(&self, constraints: &ConstraintSet, orientations: &[Orientation]) -> CaseClassification {
        let case = Self::case_of(constraints, orientations);
        let consumed = u8::try_from(constraints.populated_count()).unwrap_or(u8::MAX);
        let missing = match case {
            CaseType::Indeterminate => Self::closest_missing(constraints),
            _ => constraints.missing(case.required_slots()),
        };
        CaseClassification::new(case, consumed, missing)
    }

    fn case_of(c: &ConstraintSet, orientations: &[Orientation]) -> CaseType {
        let theta = c.get(SlotName::Theta);
        let phi = c.get(SlotName::Phi);
        let stated = |o: Orientation| orientations.contains(&o);

        if is(theta, 90.0) || stated(Orientation::PerpendicularToHp) {
            CaseType::PerpendicularToHp
        } else if is(phi, 90.0) || stated(Orientation::PerpendicularToVp) {
            CaseType::PerpendicularToVp
        } else if is_oblique(theta) && is_oblique(phi) {
            CaseType::InclinedToBoth
        } else if is_oblique(theta) && is(phi, 0.0) {
            CaseType::InclinedToHpParallelToVp
        } else if is_oblique(phi) && is(theta, 0.0) {
            CaseType::InclinedToVpParallelToHp
        } else {
            CaseType::Indeterminate
        }
    }

    /// Smallest set of absent slots that some line case would still need.
    fn closest_missing(c: &ConstraintSet) -> Vec<SlotName> {
        CaseType::LINE_CASES
            .iter()
            .map(|case| c.missing(case.required_slots()))
            .min_by_key(Vec::len)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[(SlotName, f64)]) -> ConstraintSet {
        values
            .iter()
            .fold(ConstraintSet::new(), |c, &(n, v)| c.with(n, v))
    }

    fn full(theta: f64, phi: f64) -> ConstraintSet {
        set(&[
            (SlotName::TrueLength, 70.0),
            (SlotName::Theta, theta),
            (SlotName::Phi, phi),
            (SlotName::HeightA, 10.0),
            (SlotName::DistanceA, 15.0),
        ])
    }

    #[test]
    fn test_classification_by_angles() {
        let c = Classifier::new();
        let cases = [
            ((90.0, 0.0), CaseType::PerpendicularToHp),
            ((0.0, 90.0), CaseType::PerpendicularToVp),
            ((30.0, 45.0), CaseType::InclinedToBoth),
            ((30.0, 0.0), CaseType::InclinedToHpParallelToVp),
            ((0.0, 40.0), CaseType::InclinedToVpParallelToHp),
            ((0.0, 0.0), CaseType::Indeterminate),
        ];
        for ((theta, phi), expected) in cases {
            let r = c.classify(&full(theta, phi), &[]);
            assert_eq!(r.case_type, expected, "theta={theta} phi={phi}");
            assert_eq!(r.proc_id, expected.proc_id());
        }
    }

    #[test]
    fn test_complete_problem_is_sufficient() {
        let r = Classifier::new().classify(&full(30.0, 45.0), &[]);
        assert!(r.completeness.sufficient);
        assert!(r.completeness.missing.is_empty());
        assert_eq!(r.slots_consumed, 5);
    }

    #[test]
    fn test_orientation_phrase_beats_missing_angles() {
        let c = set(&[(SlotName::TrueLength, 70.0), (SlotName::HeightA, 10.0)]);
        let r = Classifier::new().classify(&c, &[Orientation::PerpendicularToVp]);
        assert_eq!(r.case_type, CaseType::PerpendicularToVp);
        assert_eq!(
            r.completeness.missing,
            vec![SlotName::Theta, SlotName::Phi, SlotName::DistanceA]
        );
        assert!(!r.completeness.sufficient);
    }

    #[test]
    fn test_theta_ninety_wins_over_phi_ninety() {
        let r = Classifier::new().classify(&full(90.0, 90.0), &[]);
        assert_eq!(r.case_type, CaseType::PerpendicularToHp);
    }

    #[test]
    fn test_indeterminate_reports_smallest_missing_set() {
        let c = set(&[(SlotName::TrueLength, 70.0), (SlotName::Theta, 30.0)]);
        let r = Classifier::new().classify(&c, &[]);
        assert_eq!(r.case_type, CaseType::Indeterminate);
        assert_eq!(
            r.completeness.missing,
            vec![SlotName::Phi, SlotName::HeightA, SlotName::DistanceA]
        );
        assert!(!r.completeness.sufficient);
        assert_eq!(r.slots_consumed, 2);
    }

    #[test]
    fn test_end_b_slots_count_toward_consumed_cap() {
        let c = full(30.0, 45.0)
            .with(SlotName::HeightB, 45.0)
            .with(SlotName::DistanceB, 64.5);
        let r = Classifier::new().classify(&c, &[]);
        assert_eq!(r.slots_consumed, 5);
    }
}
