//! Slot extractor.
//!
//! Scans normalized text with a table of patterns ranked by specificity:
//!
//! 1. Generic phrases (`10 above hp`) attributed to end A
//! 2. Named phrases (`length 70`, `end b 40 above hp`, `30 deg to hp`)
//! 3. Explicit symbols (`tl = 70`, `theta: 30`, `h_a = 10`, `inclined at 30 deg to hp`)
//!
//! Patterns run from most to least specific. A number claimed by one match
//! cannot be claimed again, so `end a 10 above hp` never also yields a
//! generic reading of `10 above hp`. Per slot, the most specific candidate
//! wins; two equally specific candidates with different values are an
//! ambiguity. Orientation phrases (`perpendicular to hp`, `parallel to vp`)
//! are collected as markers and imply angle slots afterwards.

use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

use ortho_ir::{format, ConstraintSet, Slot, SlotName, SlotSource, Span};

use crate::error::ExtractionAmbiguityError;
use crate::normalize::Normalized;

/// Orientation stated in words rather than as an angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// "perpendicular to HP".
    PerpendicularToHp,
    /// "perpendicular to VP".
    PerpendicularToVp,
    /// "parallel to HP".
    ParallelToHp,
    /// "parallel to VP".
    ParallelToVp,
}

impl Orientation {
    /// Canonical phrase.
    pub fn phrase(&self) -> &'static str {
        match self {
            Orientation::PerpendicularToHp => "perpendicular to HP",
            Orientation::PerpendicularToVp => "perpendicular to VP",
            Orientation::ParallelToHp => "parallel to HP",
            Orientation::ParallelToVp => "parallel to VP",
        }
    }

    /// Angle slots this orientation fixes.
    pub fn implied(&self) -> &'static [(SlotName, f64)] {
        match self {
            Orientation::PerpendicularToHp => &[(SlotName::Theta, 90.0), (SlotName::Phi, 0.0)],
            Orientation::PerpendicularToVp => &[(SlotName::Phi, 90.0), (SlotName::Theta, 0.0)],
            Orientation::ParallelToHp => &[(SlotName::Theta, 0.0)],
            Orientation::ParallelToVp => &[(SlotName::Phi, 0.0)],
        }
    }
}

/// An orientation phrase and where it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Orientation.
    pub orientation: Orientation,
    /// Span in the normalized text.
    pub span: Span,
}

/// One possible value for an ambiguous slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Value.
    pub value: f64,
    /// Span of the value in the normalized text.
    pub span: Span,
    /// Span of the value in the original text.
    pub original_span: Option<Span>,
    /// Specificity of the pattern that produced it.
    pub specificity: u8,
}

/// A slot filled by two or more equally specific, disagreeing matches.
#[derive(Debug, Clone, PartialEq)]
pub struct Ambiguity {
    /// The slot.
    pub slot: SlotName,
    /// Candidates in text order.
    pub candidates: Vec<Candidate>,
}

impl Ambiguity {
    /// Build the slot for the candidate at `index`.
    pub fn resolve(&self, index: usize) -> Option<Slot> {
        let c = self.candidates.get(index)?;
        Some(Slot {
            name: self.slot,
            value: c.value,
            unit: self.slot.unit(),
            span: Some(c.span),
            original_span: c.original_span,
            confidence: confidence(c.specificity),
            source: SlotSource::Disambiguated {
                candidates: self.candidates.len(),
            },
        })
    }
}

impl fmt::Display for Ambiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.slot.unit().suffix();
        let listed: Vec<String> = self
            .candidates
            .iter()
            .map(|c| {
                let at = c.original_span.unwrap_or(c.span);
                format!("{} {unit} at {}..{}", format::exact(c.value), at.start, at.end)
            })
            .collect();
        write!(f, "{}: {}", self.slot, listed.join(", "))
    }
}

/// Extracted slots, orientation markers, and contradictions between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Slots, explicit ones first.
    pub slots: Vec<Slot>,
    /// Orientation phrases in text order.
    pub markers: Vec<Marker>,
    /// Contradictions between orientation phrases and slot values.
    pub conflicts: Vec<String>,
}

impl Extraction {
    /// Resolved constraint set.
    pub fn constraints(&self) -> ConstraintSet {
        ConstraintSet::from_slots(&self.slots)
    }

    /// The slot for `name`, if any.
    pub fn slot(&self, name: SlotName) -> Option<&Slot> {
        self.slots.iter().find(|s| s.name == name)
    }

    /// Whether the text states `orientation`.
    pub fn has(&self, orientation: Orientation) -> bool {
        self.markers.iter().any(|m| m.orientation == orientation)
    }

    fn value(&self, name: SlotName) -> Option<f64> {
        self.slot(name).map(|s| s.value)
    }
}

const NUM: &str = r"-?\d+(?:\.\d+)?";
/// Start of a number: `\b` would not match before a minus sign.
const LEAD: &str = r"(?:^|[\s(,;:=])";
const END: &str =
    r"(?:end [ab]|point [ab]|[ab] end|lower end|upper end|one end|other end|near end|far end)";
const HP: &str = r"(?:the )?hp\b";
const VP: &str = r"(?:the )?vp\b";

struct SlotPattern {
    specificity: u8,
    regex: Regex,
}

fn expand(template: &str) -> String {
    template
        .replace("{LEAD}", LEAD)
        .replace("{NUM}", NUM)
        .replace("{END}", END)
        .replace("{HP}", HP)
        .replace("{VP}", VP)
}

/// Ordered most specific first.
static SLOT_PATTERNS: LazyLock<Vec<SlotPattern>> = LazyLock::new(|| {
    [
        (3, r"\b(?:tl|true length)(?: of the line)?(?: is| =|:| of)? (?P<tl>{NUM})"),
        (3, r"\btheta(?: is| =|:)? (?P<theta>{NUM})"),
        (3, r"\bphi(?: is| =|:)? (?P<phi>{NUM})"),
        (3, r"\binclined at (?P<theta>{NUM}) deg to {HP}"),
        (3, r"\binclined to {HP} at (?P<theta>{NUM})"),
        (3, r"\binclined at (?P<phi>{NUM}) deg to {VP}"),
        (3, r"\binclined to {VP} at (?P<phi>{NUM})"),
        (3, r"\bh_(?P<end>[ab])(?: is| =|:)? (?P<h>{NUM})"),
        (3, r"\bd_(?P<end>[ab])(?: is| =|:)? (?P<d>{NUM})"),
        (2, r"\blength(?: of the line)?(?: is| =|:| of)? (?P<tl>{NUM})"),
        (2, r"{LEAD}(?P<tl>{NUM})(?: mm)? long\b"),
        (2, r"{LEAD}(?P<theta>{NUM}) deg (?:to|with) {HP}"),
        (2, r"{LEAD}(?P<phi>{NUM}) deg (?:to|with) {VP}"),
        (
            2,
            r"\b(?P<end>{END})(?: is)?(?: at)? (?P<h>{NUM})(?: mm)? (?P<hdir>above|below) {HP},?(?: and)?(?: is)? (?P<d>{NUM})(?: mm)? (?P<ddir>in front of|behind) {VP}",
        ),
        (
            2,
            r"\b(?P<end>{END})(?: is)?(?: at)? (?P<d>{NUM})(?: mm)? (?P<ddir>in front of|behind) {VP},?(?: and)?(?: is)? (?P<h>{NUM})(?: mm)? (?P<hdir>above|below) {HP}",
        ),
        (
            2,
            r"\b(?P<end>{END})(?: is| rests)? (?P<hon>on|in) {HP},?(?: and)?(?: is)? (?P<d>{NUM})(?: mm)? (?P<ddir>in front of|behind) {VP}",
        ),
        (
            2,
            r"\b(?P<end>{END})(?: is| rests)? (?P<don>on|in) {VP},?(?: and)?(?: is)? (?P<h>{NUM})(?: mm)? (?P<hdir>above|below) {HP}",
        ),
        (2, r"\b(?P<end>{END})(?: is)?(?: at)? (?P<h>{NUM})(?: mm)? (?P<hdir>above|below) {HP}"),
        (2, r"\b(?P<end>{END})(?: is)?(?: at)? (?P<d>{NUM})(?: mm)? (?P<ddir>in front of|behind) {VP}"),
        (2, r"\b(?P<end>{END})(?: is| rests)? (?P<hon>on|in) {HP}"),
        (2, r"\b(?P<end>{END})(?: is| rests)? (?P<don>on|in) {VP}"),
        (1, r"{LEAD}(?P<h>{NUM})(?: mm)? (?P<hdir>above|below) {HP}"),
        (1, r"{LEAD}(?P<d>{NUM})(?: mm)? (?P<ddir>in front of|behind) {VP}"),
        (1, r"\brests (?P<hon>on|in) {HP}"),
        (1, r"\brests (?P<don>on|in) {VP}"),
    ]
    .into_iter()
    .map(|(specificity, template)| SlotPattern {
        specificity,
        regex: Regex::new(&expand(template)).expect("slot pattern compiles"),
    })
    .collect()
});

static MARKER_PATTERNS: LazyLock<Vec<(Regex, &'static [Orientation])>> = LazyLock::new(|| {
    let table: [(&str, &'static [Orientation]); 5] = [
        (r"\bperpendicular to {HP}", &[Orientation::PerpendicularToHp]),
        (r"\bperpendicular to {VP}", &[Orientation::PerpendicularToVp]),
        (
            r"\bparallel to (?:both )?{HP} and {VP}|\bparallel to both\b",
            &[Orientation::ParallelToHp, Orientation::ParallelToVp],
        ),
        (r"\bparallel to {HP}", &[Orientation::ParallelToHp]),
        (r"\bparallel to {VP}", &[Orientation::ParallelToVp]),
    ];
    table
        .into_iter()
        .map(|(template, orientations)| {
            (
                Regex::new(&expand(template)).expect("marker pattern compiles"),
                orientations,
            )
        })
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    A,
    B,
}

fn endpoint(phrase: &str) -> Endpoint {
    let far = ["upper", "other", "far"].iter().any(|w| phrase.contains(w));
    if far || phrase.split_whitespace().any(|w| w == "b") {
        Endpoint::B
    } else {
        Endpoint::A
    }
}

fn confidence(specificity: u8) -> f32 {
    match specificity {
        3.. => 0.95,
        2 => 0.8,
        _ => 0.6,
    }
}

fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

/// Pattern-based slot extractor. Holds only immutable pattern tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor;

impl Extractor {
    /// Create an extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract slots and markers from normalized text.
    ///
    /// Absent slots are simply missing. Ambiguous slots are returned as an
    /// error carrying the rest of the extraction.
    pub fn extract(&self, normalized: &Normalized) -> Result<Extraction, ExtractionAmbiguityError> {
        let (slots, ambiguities) = self.scan_slots(normalized);
        let partial = Extraction {
            slots,
            markers: self.scan_markers(normalized),
            conflicts: Vec::new(),
        };
        if ambiguities.is_empty() {
            Ok(self.finish(partial, Vec::new()))
        } else {
            Err(ExtractionAmbiguityError {
                partial,
                ambiguities,
            })
        }
    }

    /// Add `resolved` slots to a partial extraction and apply implications.
    pub fn finish(&self, partial: Extraction, resolved: Vec<Slot>) -> Extraction {
        let mut ex = partial;
        ex.slots.extend(resolved);
        apply_markers(&mut ex);
        derive_from_end_b(&mut ex);
        apply_right_angles(&mut ex);
        ex
    }

    fn scan_slots(&self, normalized: &Normalized) -> (Vec<Slot>, Vec<Ambiguity>) {
        let text = normalized.text.as_str();
        let mut claimed: Vec<Span> = Vec::new();
        let mut found: Vec<(SlotName, Candidate)> = Vec::new();

        for pattern in SLOT_PATTERNS.iter() {
            for caps in pattern.regex.captures_iter(text) {
                for (name, value, span) in read_values(&caps) {
                    if claimed.iter().any(|c| c.overlaps(&span)) {
                        continue;
                    }
                    claimed.push(span);
                    found.push((
                        name,
                        Candidate {
                            value,
                            span,
                            original_span: normalized.original_span(span),
                            specificity: pattern.specificity,
                        },
                    ));
                }
            }
        }

        let mut slots = Vec::new();
        let mut ambiguities = Vec::new();
        for name in SlotName::ALL {
            let Some(best) = found
                .iter()
                .filter(|(n, _)| *n == name)
                .map(|(_, c)| c.specificity)
                .max()
            else {
                continue;
            };
            let mut top: Vec<Candidate> = found
                .iter()
                .filter(|(n, c)| *n == name && c.specificity == best)
                .map(|(_, c)| c.clone())
                .collect();
            top.sort_by_key(|c| c.span.start);

            let disagree = top.iter().any(|c| c.value != top[0].value);
            if disagree {
                ambiguities.push(Ambiguity {
                    slot: name,
                    candidates: top,
                });
            } else {
                let c = &top[0];
                slots.push(Slot {
                    name,
                    value: c.value,
                    unit: name.unit(),
                    span: Some(c.span),
                    original_span: c.original_span,
                    confidence: confidence(c.specificity),
                    source: SlotSource::Pattern {
                        specificity: c.specificity,
                    },
                });
            }
        }
        (slots, ambiguities)
    }

    fn scan_markers(&self, normalized: &Normalized) -> Vec<Marker> {
        let mut markers: Vec<Marker> = Vec::new();
        for (regex, orientations) in MARKER_PATTERNS.iter() {
            for m in regex.find_iter(&normalized.text) {
                for &orientation in orientations.iter() {
                    if !markers.iter().any(|k| k.orientation == orientation) {
                        markers.push(Marker {
                            orientation,
                            span: Span::new(m.start(), m.end()),
                        });
                    }
                }
            }
        }
        markers.sort_by_key(|m| m.span.start);
        markers
    }
}

/// Values captured by one pattern match.
fn read_values(caps: &Captures<'_>) -> Vec<(SlotName, f64, Span)> {
    let end = caps
        .name("end")
        .map(|m| endpoint(m.as_str()))
        .unwrap_or(Endpoint::A);
    let (height, distance) = match end {
        Endpoint::A => (SlotName::HeightA, SlotName::DistanceA),
        Endpoint::B => (SlotName::HeightB, SlotName::DistanceB),
    };
    let sign = |group: &str, negative: &str| match caps.name(group) {
        Some(m) if m.as_str() == negative => -1.0,
        _ => 1.0,
    };

    let mut values = Vec::new();
    let mut number = |group: &str, name: SlotName, sign: f64| {
        if let Some(m) = caps.name(group) {
            if let Ok(v) = m.as_str().parse::<f64>() {
                values.push((name, sign * v, Span::new(m.start(), m.end())));
            }
        }
    };
    number("tl", SlotName::TrueLength, 1.0);
    number("theta", SlotName::Theta, 1.0);
    number("phi", SlotName::Phi, 1.0);
    number("h", height, sign("hdir", "below"));
    number("d", distance, sign("ddir", "behind"));

    for (group, name) in [("hon", height), ("don", distance)] {
        if let Some(m) = caps.name(group) {
            values.push((name, 0.0, Span::new(m.start(), m.end())));
        }
    }
    values
}

fn apply_markers(ex: &mut Extraction) {
    let markers = ex.markers.clone();
    for marker in markers {
        let phrase = marker.orientation.phrase();
        for &(name, value) in marker.orientation.implied() {
            match ex.slot(name) {
                None => ex.slots.push(Slot {
                    span: Some(marker.span),
                    ..Slot::implied(name, value, phrase)
                }),
                Some(existing) if existing.value != value => {
                    let what = match &existing.source {
                        SlotSource::Implied { reason } => format!("'{reason}'"),
                        _ => format!("{name} = {}", format::deg(existing.value)),
                    };
                    ex.conflicts.push(format!(
                        "'{phrase}' contradicts {what}: {phrase} requires {name} = {}",
                        format::deg(value)
                    ));
                }
                Some(_) => {}
            }
        }
    }
}

/// Fill an inclination from both end positions, or end A from end B and the inclination.
fn derive_from_end_b(ex: &mut Extraction) {
    use SlotName::*;
    let Some(tl) = ex.value(TrueLength).filter(|tl| *tl > 0.0) else {
        return;
    };

    for (angle, near, far) in [(Theta, HeightA, HeightB), (Phi, DistanceA, DistanceB)] {
        match (ex.value(angle), ex.value(near), ex.value(far)) {
            (None, Some(a), Some(b)) if (b - a).abs() <= tl => {
                let deg = round6(((b - a).abs() / tl).asin().to_degrees());
                ex.slots.push(Slot::derived(angle, deg, &[TrueLength, near, far]));
            }
            (Some(deg), None, Some(b)) => {
                let a = round6(b - tl * deg.to_radians().sin());
                ex.slots.push(Slot::derived(near, a, &[TrueLength, angle, far]));
            }
            _ => {}
        }
    }
}

fn apply_right_angles(ex: &mut Extraction) {
    for (right, other) in [
        (SlotName::Theta, SlotName::Phi),
        (SlotName::Phi, SlotName::Theta),
    ] {
        let is_right = ex.value(right).is_some_and(|v| (v - 90.0).abs() < 1e-9);
        if is_right && ex.slot(other).is_none() {
            ex.slots
                .push(Slot::implied(other, 0.0, format!("{right} = 90°")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Normalizer;
    use approx::assert_abs_diff_eq;

    fn run(text: &str) -> Result<Extraction, ExtractionAmbiguityError> {
        let n = Normalizer::new().normalize(text).unwrap();
        Extractor::new().extract(&n)
    }

    fn values(text: &str) -> ConstraintSet {
        run(text).unwrap().constraints()
    }

    #[test]
    fn test_perpendicular_to_hp_problem() {
        let ex = run("line perpendicular to HP, length 70, lower end 10 above HP, 15 in front of VP")
            .unwrap();
        let c = ex.constraints();
        assert_eq!(c.get(SlotName::TrueLength), Some(70.0));
        assert_eq!(c.get(SlotName::HeightA), Some(10.0));
        assert_eq!(c.get(SlotName::DistanceA), Some(15.0));
        assert_eq!(c.get(SlotName::Theta), Some(90.0));
        assert_eq!(c.get(SlotName::Phi), Some(0.0));
        assert!(ex.has(Orientation::PerpendicularToHp));
        assert!(!ex.slot(SlotName::Theta).unwrap().is_explicit());
        assert!(ex.conflicts.is_empty());
    }

    #[test]
    fn test_named_end_b_clause() {
        let c = values("end b is 40 mm above hp and 25 mm in front of vp, 10 above hp");
        assert_eq!(c.get(SlotName::HeightB), Some(40.0));
        assert_eq!(c.get(SlotName::DistanceB), Some(25.0));
        assert_eq!(c.get(SlotName::HeightA), Some(10.0));
        assert_eq!(c.get(SlotName::DistanceA), None);
    }

    #[test]
    fn test_explicit_symbols() {
        let c = values("TL = 80, θ = 30°, φ: 45, h_A = 12.5, d_A = 20");
        assert_eq!(c.get(SlotName::TrueLength), Some(80.0));
        assert_eq!(c.get(SlotName::Theta), Some(30.0));
        assert_eq!(c.get(SlotName::Phi), Some(45.0));
        assert_eq!(c.get(SlotName::HeightA), Some(12.5));
        assert_eq!(c.get(SlotName::DistanceA), Some(20.0));
    }

    #[test]
    fn test_inclination_phrases() {
        let c = values("a line 75 mm long is inclined at 30 degrees to HP and 45° to the VP");
        assert_eq!(c.get(SlotName::TrueLength), Some(75.0));
        assert_eq!(c.get(SlotName::Theta), Some(30.0));
        assert_eq!(c.get(SlotName::Phi), Some(45.0));
    }

    #[test]
    fn test_higher_specificity_wins() {
        let ex = run("a rod 80 mm long whose true length is 70 mm").unwrap();
        let tl = ex.slot(SlotName::TrueLength).unwrap();
        assert_eq!(tl.value, 70.0);
        assert_eq!(tl.source, SlotSource::Pattern { specificity: 3 });
    }

    #[test]
    fn test_equal_specificity_disagreement_is_ambiguous() {
        let err = run("length 70, lower end 10 above hp, length 80").unwrap_err();
        assert_eq!(err.ambiguities.len(), 1);
        let amb = &err.ambiguities[0];
        assert_eq!(amb.slot, SlotName::TrueLength);
        let vals: Vec<f64> = amb.candidates.iter().map(|c| c.value).collect();
        assert_eq!(vals, vec![70.0, 80.0]);
        assert!(err.partial.slot(SlotName::TrueLength).is_none());
        assert_eq!(err.partial.slot(SlotName::HeightA).unwrap().value, 10.0);
        assert!(err.to_string().contains("TL"));

        let chosen = amb.resolve(1).unwrap();
        assert_eq!(chosen.value, 80.0);
        assert_eq!(chosen.source, SlotSource::Disambiguated { candidates: 2 });
    }

    #[test]
    fn test_repeated_equal_value_is_not_ambiguous() {
        let c = values("length 70 ... again, length 70");
        assert_eq!(c.get(SlotName::TrueLength), Some(70.0));
    }

    #[test]
    fn test_negative_and_zero_positions() {
        let c = values("end a 5 below hp and 10 behind vp");
        assert_eq!(c.get(SlotName::HeightA), Some(-5.0));
        assert_eq!(c.get(SlotName::DistanceA), Some(-10.0));

        let c = values("one end rests on HP and is 20 mm in front of VP");
        assert_eq!(c.get(SlotName::HeightA), Some(0.0));
        assert_eq!(c.get(SlotName::DistanceA), Some(20.0));
    }

    #[test]
    fn test_signed_values_keep_their_sign() {
        let c = values("lower end -5 mm above HP, 15 in front of VP");
        assert_eq!(c.get(SlotName::HeightA), Some(-5.0));
        assert_eq!(c.get(SlotName::DistanceA), Some(15.0));

        let c = values("-5 above hp, h_B = -2.5");
        assert_eq!(c.get(SlotName::HeightA), Some(-5.0));
        assert_eq!(c.get(SlotName::HeightB), Some(-2.5));

        let c = values("a line 70 mm long inclined at 30° to HP");
        assert_eq!(c.get(SlotName::TrueLength), Some(70.0));
        assert_eq!(c.get(SlotName::Theta), Some(30.0));
    }

    #[test]
    fn test_plane_mention_alone_sets_no_position() {
        let c = values(
            "Draw the projections on HP and VP of a line 70 long perpendicular to HP, 15 in front of VP",
        );
        assert_eq!(c.get(SlotName::HeightA), None);
        assert_eq!(c.get(SlotName::DistanceA), Some(15.0));

        let c = values("the line rests on HP, 20 in front of VP");
        assert_eq!(c.get(SlotName::HeightA), Some(0.0));

        let c = values("lower end resting on the HP");
        assert_eq!(c.get(SlotName::HeightA), Some(0.0));
    }

    #[test]
    fn test_inclination_derived_from_end_heights() {
        let ex = run("tl 100, end a 10 above hp and 20 in front of vp, end b 60 above hp").unwrap();
        let theta = ex.slot(SlotName::Theta).unwrap();
        assert_abs_diff_eq!(theta.value, 30.0, epsilon = 1e-9);
        assert!(matches!(theta.source, SlotSource::Derived { .. }));
    }

    #[test]
    fn test_end_a_derived_from_end_b() {
        let c = values("tl 60, parallel to vp, theta 30, end b 50 above hp, end a 15 in front of vp");
        assert_abs_diff_eq!(c.get(SlotName::HeightA).unwrap(), 20.0, epsilon = 1e-9);
        assert_eq!(c.get(SlotName::Phi), Some(0.0));
    }

    #[test]
    fn test_right_angle_implies_other_angle() {
        let c = values("theta = 90, length 50");
        assert_eq!(c.get(SlotName::Phi), Some(0.0));
    }

    #[test]
    fn test_contradictory_orientations() {
        let ex = run("a line perpendicular to hp and perpendicular to vp").unwrap();
        assert!(!ex.conflicts.is_empty());

        let ex = run("parallel to vp, phi = 30").unwrap();
        assert_eq!(ex.conflicts.len(), 1);
        assert!(ex.conflicts[0].contains("parallel to VP"));
    }

    #[test]
    fn test_original_spans_are_reported() {
        let text = "Line 7 cm long, end A 1 cm above H.P.";
        let ex = run(text).unwrap();
        let tl = ex.slot(SlotName::TrueLength).unwrap();
        assert_eq!(tl.value, 70.0);
        let span = tl.original_span.unwrap();
        assert_eq!(&text[span.start..span.end], "7 cm");
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let ex = run("draw the projections").unwrap();
        assert!(ex.slots.is_empty());
        assert!(ex.markers.is_empty());
    }
}
