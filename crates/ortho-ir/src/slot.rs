//! Named scalar parameters of a line-projection problem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a slot. The serialized names are the wire names a renderer sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SlotName {
    /// True length of the line.
    #[serde(rename = "TL")]
    TrueLength,
    /// Inclination of the line to HP, in degrees.
    #[serde(rename = "theta")]
    Theta,
    /// Inclination of the line to VP, in degrees.
    #[serde(rename = "phi")]
    Phi,
    /// Height of end A above HP.
    #[serde(rename = "h_A")]
    HeightA,
    /// Distance of end A in front of VP.
    #[serde(rename = "d_A")]
    DistanceA,
    /// Height of end B above HP.
    #[serde(rename = "h_B")]
    HeightB,
    /// Distance of end B in front of VP.
    #[serde(rename = "d_B")]
    DistanceB,
}

impl SlotName {
    /// Every slot, in canonical order.
    pub const ALL: [SlotName; 7] = [
        SlotName::TrueLength,
        SlotName::Theta,
        SlotName::Phi,
        SlotName::HeightA,
        SlotName::DistanceA,
        SlotName::HeightB,
        SlotName::DistanceB,
    ];

    /// The five slots that fully determine a line and its position.
    pub const CORE: [SlotName; 5] = [
        SlotName::TrueLength,
        SlotName::Theta,
        SlotName::Phi,
        SlotName::HeightA,
        SlotName::DistanceA,
    ];

    /// Upper bound of `slotsConsumed`.
    pub const MAX_CONSUMED: u8 = 5;

    /// Wire name (`TL`, `theta`, `h_A`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotName::TrueLength => "TL",
            SlotName::Theta => "theta",
            SlotName::Phi => "phi",
            SlotName::HeightA => "h_A",
            SlotName::DistanceA => "d_A",
            SlotName::HeightB => "h_B",
            SlotName::DistanceB => "d_B",
        }
    }

    /// Human-readable description used in validation messages.
    pub fn description(&self) -> &'static str {
        match self {
            SlotName::TrueLength => "true length",
            SlotName::Theta => "inclination to HP",
            SlotName::Phi => "inclination to VP",
            SlotName::HeightA => "height of end A above HP",
            SlotName::DistanceA => "distance of end A in front of VP",
            SlotName::HeightB => "height of end B above HP",
            SlotName::DistanceB => "distance of end B in front of VP",
        }
    }

    /// Unit the slot value is expressed in.
    pub fn unit(&self) -> Unit {
        match self {
            SlotName::Theta | SlotName::Phi => Unit::Degree,
            _ => Unit::Millimetre,
        }
    }

    /// Whether this slot is an inclination angle.
    pub fn is_angle(&self) -> bool {
        self.unit() == Unit::Degree
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit of a slot value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    /// Millimetres.
    #[serde(rename = "mm")]
    Millimetre,
    /// Degrees.
    #[serde(rename = "deg")]
    Degree,
}

impl Unit {
    /// Short suffix (`mm`, `°`).
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Millimetre => " mm",
            Unit::Degree => "°",
        }
    }
}

/// Half-open byte range `[start, end)` into a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// First byte.
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if two spans share at least one byte.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Smallest span covering both.
    pub fn cover(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Slice `text` by this span, if it lies on char boundaries.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

/// How a slot value came to be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotSource {
    /// Matched by a text pattern of the given specificity (higher wins).
    Pattern {
        /// Pattern specificity, 1 (generic) to 3 (explicit symbol).
        specificity: u8,
    },
    /// Implied by an orientation phrase or by another slot.
    Implied {
        /// What implied it (e.g. "perpendicular to HP").
        reason: String,
    },
    /// Computed from other slots.
    Derived {
        /// Slots the value was computed from.
        from: Vec<SlotName>,
    },
    /// Chosen by an external disambiguation handler among several candidates.
    Disambiguated {
        /// Number of candidates offered.
        candidates: usize,
    },
    /// Supplied as structured input.
    Direct,
}

/// A single extracted parameter with provenance. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Which slot this fills.
    pub name: SlotName,
    /// Numeric value in [`Slot::unit`].
    pub value: f64,
    /// Unit of `value`.
    pub unit: Unit,
    /// Span of the value in the normalized text.
    pub span: Option<Span>,
    /// Span of the value in the original text.
    pub original_span: Option<Span>,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
    /// Provenance.
    pub source: SlotSource,
}

impl Slot {
    /// A slot supplied directly, with full confidence and no span.
    pub fn direct(name: SlotName, value: f64) -> Self {
        Self {
            name,
            value,
            unit: name.unit(),
            span: None,
            original_span: None,
            confidence: 1.0,
            source: SlotSource::Direct,
        }
    }

    /// A slot implied by `reason`.
    pub fn implied(name: SlotName, value: f64, reason: impl Into<String>) -> Self {
        Self {
            source: SlotSource::Implied {
                reason: reason.into(),
            },
            ..Self::direct(name, value)
        }
    }

    /// A slot computed from `from`.
    pub fn derived(name: SlotName, value: f64, from: &[SlotName]) -> Self {
        Self {
            source: SlotSource::Derived {
                from: from.to_vec(),
            },
            confidence: 0.9,
            ..Self::direct(name, value)
        }
    }

    /// Whether the value was read from the text rather than inferred.
    pub fn is_explicit(&self) -> bool {
        matches!(
            self.source,
            SlotSource::Pattern { .. } | SlotSource::Disambiguated { .. } | SlotSource::Direct
        )
    }
}
