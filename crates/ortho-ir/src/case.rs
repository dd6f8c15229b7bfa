//! Projection cases and the classification result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::slot::SlotName;

/// Orientation class of a line relative to HP and VP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    /// Line perpendicular to HP (and so parallel to VP).
    PerpendicularToHp,
    /// Line perpendicular to VP (and so parallel to HP).
    PerpendicularToVp,
    /// Line inclined at θ to HP and parallel to VP.
    InclinedToHpParallelToVp,
    /// Line inclined at φ to VP and parallel to HP.
    InclinedToVpParallelToHp,
    /// Line inclined to both planes (general position).
    InclinedToBoth,
    /// Not enough information to decide.
    Indeterminate,
}

impl CaseType {
    /// Every case with a construction procedure, in classification priority order.
    pub const LINE_CASES: [CaseType; 5] = [
        CaseType::PerpendicularToHp,
        CaseType::PerpendicularToVp,
        CaseType::InclinedToBoth,
        CaseType::InclinedToHpParallelToVp,
        CaseType::InclinedToVpParallelToHp,
    ];

    /// Stable case code.
    pub fn proc_id(&self) -> &'static str {
        match self {
            CaseType::PerpendicularToHp => "LINE-PERP-HP",
            CaseType::PerpendicularToVp => "LINE-PERP-VP",
            CaseType::InclinedToHpParallelToVp => "LINE-INCL-HP",
            CaseType::InclinedToVpParallelToHp => "LINE-INCL-VP",
            CaseType::InclinedToBoth => "LINE-INCL-BOTH",
            CaseType::Indeterminate => "LINE-UNKNOWN",
        }
    }

    /// Wire name (`perpendicular_to_hp`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseType::PerpendicularToHp => "perpendicular_to_hp",
            CaseType::PerpendicularToVp => "perpendicular_to_vp",
            CaseType::InclinedToHpParallelToVp => "inclined_to_hp_parallel_to_vp",
            CaseType::InclinedToVpParallelToHp => "inclined_to_vp_parallel_to_hp",
            CaseType::InclinedToBoth => "inclined_to_both",
            CaseType::Indeterminate => "indeterminate",
        }
    }

    /// Phrase for instruction and error text.
    pub fn description(&self) -> &'static str {
        match self {
            CaseType::PerpendicularToHp => "line perpendicular to HP",
            CaseType::PerpendicularToVp => "line perpendicular to VP",
            CaseType::InclinedToHpParallelToVp => "line inclined to HP and parallel to VP",
            CaseType::InclinedToVpParallelToHp => "line inclined to VP and parallel to HP",
            CaseType::InclinedToBoth => "line inclined to both HP and VP",
            CaseType::Indeterminate => "undetermined line orientation",
        }
    }

    /// Slots that must be present for `completeness.sufficient`.
    ///
    /// Angle slots may be satisfied by values implied from orientation phrases.
    pub fn required_slots(&self) -> &'static [SlotName] {
        match self {
            CaseType::Indeterminate => &[],
            _ => &SlotName::CORE,
        }
    }

    /// Whether a construction procedure exists for this case.
    pub fn is_line_case(&self) -> bool {
        *self != CaseType::Indeterminate
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`CaseType`] from a string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown case '{0}' (expected one of: perpendicular_to_hp, perpendicular_to_vp, inclined_to_hp_parallel_to_vp, inclined_to_vp_parallel_to_hp, inclined_to_both)")]
pub struct UnknownCase(pub String);

impl FromStr for CaseType {
    type Err = UnknownCase;

    /// Accepts the wire name, the proc id, or the wire name with dashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        CaseType::LINE_CASES
            .into_iter()
            .chain([CaseType::Indeterminate])
            .find(|case| {
                case.as_str() == wanted || case.proc_id().to_ascii_lowercase().replace('-', "_") == wanted
            })
            .ok_or_else(|| UnknownCase(s.to_string()))
    }
}

/// Whether the populated slots are enough for the classified case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completeness {
    /// All slots required by the case are present.
    pub sufficient: bool,
    /// Required slots that are absent.
    pub missing: Vec<SlotName>,
}

/// Result of classifying a set of populated slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseClassification {
    /// Stable case code.
    pub proc_id: String,
    /// Classified case.
    pub case_type: CaseType,
    /// Number of populated slots, capped at [`SlotName::MAX_CONSUMED`].
    pub slots_consumed: u8,
    /// Completeness against the case's requirement set.
    pub completeness: Completeness,
}

impl CaseClassification {
    /// Create a classification; `proc_id` follows from `case_type`.
    pub fn new(case_type: CaseType, slots_consumed: u8, missing: Vec<SlotName>) -> Self {
        let sufficient = case_type.is_line_case() && missing.is_empty();
        Self {
            proc_id: case_type.proc_id().to_string(),
            case_type,
            slots_consumed: slots_consumed.min(SlotName::MAX_CONSUMED),
            completeness: Completeness {
                sufficient,
                missing,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_round_trip_names() {
        for case in CaseType::LINE_CASES {
            assert_eq!(case.as_str().parse::<CaseType>().unwrap(), case);
            assert_eq!(case.proc_id().parse::<CaseType>().unwrap(), case);
        }
        assert_eq!(
            "Perpendicular-To-HP".parse::<CaseType>().unwrap(),
            CaseType::PerpendicularToHp
        );
        assert!("oblique".parse::<CaseType>().is_err());
    }

    #[test]
    fn test_serialized_case_matches_as_str() {
        let json = serde_json::to_string(&CaseType::InclinedToBoth).unwrap();
        assert_eq!(json, "\"inclined_to_both\"");
    }

    #[test]
    fn test_indeterminate_is_never_sufficient() {
        let c = CaseClassification::new(CaseType::Indeterminate, 5, Vec::new());
        assert!(!c.completeness.sufficient);
        assert_eq!(c.proc_id, "LINE-UNKNOWN");
    }

    #[test]
    fn test_consumed_is_capped() {
        let c = CaseClassification::new(CaseType::InclinedToBoth, 7, Vec::new());
        assert_eq!(c.slots_consumed, 5);
        assert!(c.completeness.sufficient);
    }
}
