//! Physical consistency checks.

use ortho_ir::format::{deg, exact, mm, rounded};
use ortho_ir::{CaseClassification, CaseType, ConstraintSet, SlotName, ValidationResult};

const EPS: f64 = 1e-9;

/// Checks a classified constraint set. Never changes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Validator {
    /// Allowed difference between a stated end-B position and the computed one (mm).
    pub endpoint_tolerance: f64,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            endpoint_tolerance: 0.5,
        }
    }
}

impl Validator {
    /// Create a validator with the given end-B tolerance.
    pub fn new(endpoint_tolerance: f64) -> Self {
        Self { endpoint_tolerance }
    }

    /// Validate `c` against its classification.
    pub fn validate(&self, c: &ConstraintSet, classification: &CaseClassification) -> ValidationResult {
        let case = classification.case_type;
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if let Some(tl) = c.get(SlotName::TrueLength) {
            if tl <= 0.0 {
                errors.push(format!("TL must be greater than 0 (got {})", mm(tl)));
            }
        }

        for angle in [SlotName::Theta, SlotName::Phi] {
            if let Some(v) = c.get(angle) {
                if !(0.0..=90.0).contains(&v) {
                    errors.push(format!("{angle} must be between 0° and 90° (got {})", deg(v)));
                }
            }
        }

        if let (Some(theta), Some(phi)) = (c.get(SlotName::Theta), c.get(SlotName::Phi)) {
            let sum = theta + phi;
            if sum > 90.0 + EPS {
                errors.push(format!(
                    "theta + phi must not exceed 90° (got {})",
                    deg(sum)
                ));
            } else if (sum - 90.0).abs() <= EPS && case == CaseType::InclinedToBoth {
                warnings.push(
                    "theta + phi = 90°: the line lies in a profile plane and both views are perpendicular to xy"
                        .to_string(),
                );
            }
        }

        for (slot, below, plane) in [
            (SlotName::HeightA, "below", "HP"),
            (SlotName::DistanceA, "behind", "VP"),
            (SlotName::HeightB, "below", "HP"),
            (SlotName::DistanceB, "behind", "VP"),
        ] {
            match c.get(slot) {
                Some(v) if v < 0.0 => errors.push(format!(
                    "{slot} must not be negative: the point would lie {below} {plane} (got {})",
                    mm(v)
                )),
                Some(v) if v == 0.0 => {
                    warnings.push(format!("{slot} = 0: the point lies in {plane}"))
                }
                _ => {}
            }
        }

        Self::check_case(c, case, &mut errors);

        if !classification.completeness.missing.is_empty() {
            let names: Vec<&str> = classification
                .completeness
                .missing
                .iter()
                .map(SlotName::as_str)
                .collect();
            errors.push(format!("missing required slot(s): {}", names.join(", ")));
        }

        self.check_end_b(c, &mut errors);

        ValidationResult::new(errors, warnings)
    }

    /// Angle values must agree with the classified orientation.
    fn check_case(c: &ConstraintSet, case: CaseType, errors: &mut Vec<String>) {
        let expect = |slot: SlotName, want: f64, errors: &mut Vec<String>| {
            if let Some(v) = c.get(slot) {
                if (v - want).abs() > EPS {
                    errors.push(format!(
                        "{} requires {slot} = {} (got {})",
                        case.description(),
                        deg(want),
                        deg(v)
                    ));
                }
            }
        };
        match case {
            CaseType::PerpendicularToHp => {
                expect(SlotName::Theta, 90.0, errors);
                expect(SlotName::Phi, 0.0, errors);
            }
            CaseType::PerpendicularToVp => {
                expect(SlotName::Phi, 90.0, errors);
                expect(SlotName::Theta, 0.0, errors);
            }
            CaseType::InclinedToHpParallelToVp => expect(SlotName::Phi, 0.0, errors),
            CaseType::InclinedToVpParallelToHp => expect(SlotName::Theta, 0.0, errors),
            CaseType::InclinedToBoth => {}
            CaseType::Indeterminate => errors.push(
                "line orientation could not be determined: give theta and phi, or state how the line lies relative to HP and VP"
                    .to_string(),
            ),
        }
    }

    /// End B, when stated, must sit TL·sin(angle) from end A.
    fn check_end_b(&self, c: &ConstraintSet, errors: &mut Vec<String>) {
        let Some(tl) = c.get(SlotName::TrueLength).filter(|tl| *tl > 0.0) else {
            return;
        };
        for (far, near, angle) in [
            (SlotName::HeightB, SlotName::HeightA, SlotName::Theta),
            (SlotName::DistanceB, SlotName::DistanceA, SlotName::Phi),
        ] {
            let (Some(b), Some(a), Some(v)) = (c.get(far), c.get(near), c.get(angle)) else {
                continue;
            };
            let rise = tl * v.to_radians().sin();
            let off = (b - (a + rise)).abs().min((b - (a - rise)).abs());
            if off > self.endpoint_tolerance {
                errors.push(format!(
                    "{far} = {} is inconsistent with {near} = {}, TL = {} and {angle} = {}: expected {} mm",
                    exact(b),
                    exact(a),
                    exact(tl),
                    deg(v),
                    rounded(a + rise, 2)
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;

    fn check(c: ConstraintSet) -> ValidationResult {
        let classification = Classifier::new().classify(&c, &[]);
        Validator::default().validate(&c, &classification)
    }

    fn line(tl: f64, theta: f64, phi: f64, h: f64, d: f64) -> ConstraintSet {
        ConstraintSet::new()
            .with(SlotName::TrueLength, tl)
            .with(SlotName::Theta, theta)
            .with(SlotName::Phi, phi)
            .with(SlotName::HeightA, h)
            .with(SlotName::DistanceA, d)
    }

    #[test]
    fn test_well_formed_line_is_valid() {
        let r = check(line(80.0, 30.0, 45.0, 10.0, 15.0));
        assert!(r.valid, "{:?}", r.errors);
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn test_zero_length_and_negative_height_are_errors() {
        let r = check(line(0.0, 90.0, 0.0, -5.0, 15.0));
        assert!(!r.valid);
        assert!(r.errors.iter().any(|e| e.starts_with("TL must be greater than 0")));
        assert!(r.errors.iter().any(|e| e.contains("h_A must not be negative")));
    }

    #[test]
    fn test_violations_accumulate_in_order() {
        let r = check(line(-1.0, 95.0, 0.0, 10.0, -2.0));
        assert!(r.errors.len() >= 3);
        assert!(r.errors[0].starts_with("TL"));
        assert!(r.errors[1].starts_with("theta"));
    }

    #[test]
    fn test_angle_sum() {
        let r = check(line(80.0, 50.0, 50.0, 10.0, 15.0));
        assert!(r.errors.iter().any(|e| e.contains("must not exceed 90°")));

        let r = check(line(80.0, 30.0, 60.0, 10.0, 15.0));
        assert!(r.valid);
        assert_eq!(r.warnings.len(), 1);
        assert!(r.warnings[0].contains("profile plane"));
    }

    #[test]
    fn test_zero_height_is_warning() {
        let r = check(line(70.0, 90.0, 0.0, 0.0, 15.0));
        assert!(r.valid);
        assert_eq!(r.warnings, vec!["h_A = 0: the point lies in HP"]);
    }

    #[test]
    fn test_perpendicular_contradiction_is_error() {
        let r = check(line(70.0, 90.0, 30.0, 10.0, 15.0));
        assert!(!r.valid);
        assert!(r
            .errors
            .iter()
            .any(|e| e == "line perpendicular to HP requires phi = 0° (got 30°)"));
    }

    #[test]
    fn test_missing_and_indeterminate() {
        let c = ConstraintSet::new().with(SlotName::TrueLength, 70.0);
        let r = check(c);
        assert!(!r.valid);
        assert!(r.errors.iter().any(|e| e.contains("could not be determined")));
        assert!(r.errors.iter().any(|e| e.starts_with("missing required slot(s)")));
    }

    #[test]
    fn test_end_b_cross_check() {
        let good = line(100.0, 30.0, 0.0, 10.0, 20.0).with(SlotName::HeightB, 60.2);
        assert!(check(good).valid);

        let bad = line(100.0, 30.0, 0.0, 10.0, 20.0).with(SlotName::HeightB, 70.0);
        let r = check(bad);
        assert!(!r.valid);
        assert!(r.errors[0].contains("expected 60 mm"));
    }
}
