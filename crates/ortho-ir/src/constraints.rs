//! The request-scoped constraint set handed from the interpreter to the step generator.

use serde::{Deserialize, Serialize};

use crate::slot::{Slot, SlotName};

/// Mapping from slot name to an optional value.
///
/// A `ConstraintSet` is a small `Copy` value built once per request and
/// passed by value; there is no way to mutate one in place. Builders return
/// a new set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSet {
    #[serde(rename = "TL")]
    true_length: Option<f64>,
    theta: Option<f64>,
    phi: Option<f64>,
    #[serde(rename = "h_A")]
    h_a: Option<f64>,
    #[serde(rename = "d_A")]
    d_a: Option<f64>,
    #[serde(rename = "h_B")]
    h_b: Option<f64>,
    #[serde(rename = "d_B")]
    d_b: Option<f64>,
}

impl ConstraintSet {
    /// An empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from extracted slots. The first slot for each name wins.
    pub fn from_slots<'a>(slots: impl IntoIterator<Item = &'a Slot>) -> Self {
        slots.into_iter().fold(Self::new(), |set, slot| {
            if set.is_present(slot.name) {
                set
            } else {
                set.with(slot.name, slot.value)
            }
        })
    }

    /// Return a copy with `name` set to `value`.
    pub fn with(self, name: SlotName, value: f64) -> Self {
        self.with_opt(name, Some(value))
    }

    /// Return a copy with `name` set to `value` (or cleared).
    pub fn with_opt(mut self, name: SlotName, value: Option<f64>) -> Self {
        *self.field_mut(name) = value;
        self
    }

    /// Value of `name`, if present.
    pub fn get(&self, name: SlotName) -> Option<f64> {
        match name {
            SlotName::TrueLength => self.true_length,
            SlotName::Theta => self.theta,
            SlotName::Phi => self.phi,
            SlotName::HeightA => self.h_a,
            SlotName::DistanceA => self.d_a,
            SlotName::HeightB => self.h_b,
            SlotName::DistanceB => self.d_b,
        }
    }

    /// Check if `name` has a value.
    pub fn is_present(&self, name: SlotName) -> bool {
        self.get(name).is_some()
    }

    /// Present slots in canonical order.
    pub fn populated(&self) -> impl Iterator<Item = (SlotName, f64)> + '_ {
        SlotName::ALL
            .into_iter()
            .filter_map(|name| self.get(name).map(|v| (name, v)))
    }

    /// Number of present slots (uncapped).
    pub fn populated_count(&self) -> usize {
        self.populated().count()
    }

    /// Slots of `required` that have no value, in the order given.
    pub fn missing(&self, required: &[SlotName]) -> Vec<SlotName> {
        required
            .iter()
            .copied()
            .filter(|name| !self.is_present(*name))
            .collect()
    }

    fn field_mut(&mut self, name: SlotName) -> &mut Option<f64> {
        match name {
            SlotName::TrueLength => &mut self.true_length,
            SlotName::Theta => &mut self.theta,
            SlotName::Phi => &mut self.phi,
            SlotName::HeightA => &mut self.h_a,
            SlotName::DistanceA => &mut self.d_a,
            SlotName::HeightB => &mut self.h_b,
            SlotName::DistanceB => &mut self.d_b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_is_by_value() {
        let base = ConstraintSet::new().with(SlotName::TrueLength, 70.0);
        let extended = base.with(SlotName::HeightA, 10.0);
        assert_eq!(base.get(SlotName::HeightA), None);
        assert_eq!(extended.get(SlotName::HeightA), Some(10.0));
        assert_eq!(extended.populated_count(), 2);
    }

    #[test]
    fn test_missing_keeps_order() {
        let c = ConstraintSet::new().with(SlotName::Phi, 30.0);
        assert_eq!(
            c.missing(&SlotName::CORE),
            vec![
                SlotName::TrueLength,
                SlotName::Theta,
                SlotName::HeightA,
                SlotName::DistanceA
            ]
        );
    }

    #[test]
    fn test_first_slot_wins() {
        let slots = [
            Slot::direct(SlotName::TrueLength, 70.0),
            Slot::direct(SlotName::TrueLength, 80.0),
        ];
        let c = ConstraintSet::from_slots(&slots);
        assert_eq!(c.get(SlotName::TrueLength), Some(70.0));
    }

    #[test]
    fn test_json_has_every_slot() {
        let c = ConstraintSet::new().with(SlotName::TrueLength, 70.0);
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json["TL"], 70.0);
        assert!(json["theta"].is_null());
        assert!(json.as_object().unwrap().contains_key("d_B"));
    }
}
