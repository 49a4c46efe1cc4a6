//! Addon entity model
//!
//! An addon is one component or augment reconstructed from an item export.
//! It starts life as a name plus its raw text block and is filled in by the
//! extractor, then flagged by the availability evaluator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::extract::AttributeSet;

/// Item class, which decides the kind of slot an addon can occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddonClass {
    Component,
    Augment,
}

impl fmt::Display for AddonClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddonClass::Component => write!(f, "Component"),
            AddonClass::Augment => write!(f, "Augment"),
        }
    }
}

/// One resistance bonus, e.g. `+12% Fire Resistance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResistanceBonus {
    pub magnitude: f64,
    pub kind: String,
}

impl ResistanceBonus {
    pub fn new(magnitude: f64, kind: impl Into<String>) -> Self {
        Self {
            magnitude,
            kind: kind.into(),
        }
    }
}

/// Vendor reputation tier required to buy an item of the given item level.
///
/// Collected by hand from the faction vendors; every other level needs no
/// reputation at all.
pub fn required_status_for_item_level(item_level: Option<i64>) -> i64 {
    match item_level {
        Some(1) => 1,
        Some(40) => 3,
        Some(50) => 4,
        Some(65) => 3,
        Some(70) => 4,
        Some(90) => 4,
        _ => 0,
    }
}

/// A parsed component or augment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addon {
    pub name: String,
    #[serde(skip_serializing, default)]
    pub raw_text: String,
    pub item_level: Option<i64>,
    pub required_player_level: Option<i64>,
    pub crafted: bool,
    pub resistances: Vec<ResistanceBonus>,
    pub factions: Vec<String>,
    pub required_status: i64,
    pub slots: BTreeSet<String>,
    pub available: bool,
}

impl Addon {
    /// Create an addon holding only its name and raw block
    pub fn new(name: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_text: raw_text.into(),
            item_level: None,
            required_player_level: None,
            crafted: false,
            resistances: Vec::new(),
            factions: Vec::new(),
            required_status: 0,
            slots: BTreeSet::new(),
            available: false,
        }
    }

    /// Overwrite the derived fields with a freshly extracted attribute set
    pub fn apply(&mut self, attrs: AttributeSet) {
        self.item_level = attrs.item_level;
        self.required_player_level = attrs.required_player_level;
        self.crafted = attrs.crafted;
        self.resistances = attrs.resistances;
        self.factions = attrs.factions;
        self.slots = attrs.slots;
        self.required_status = required_status_for_item_level(self.item_level);
    }

    /// An addon is only worth keeping if it fits somewhere and resists something
    pub fn is_valid(&self) -> bool {
        !self.slots.is_empty() && !self.resistances.is_empty()
    }
}

fn display_opt(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for Addon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resistances: Vec<String> = self
            .resistances
            .iter()
            .map(|r| format!("{}% {}", r.magnitude, r.kind))
            .collect();
        let slots: Vec<&str> = self.slots.iter().map(String::as_str).collect();

        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Item Level: {}", display_opt(self.item_level))?;
        writeln!(
            f,
            "Required Player Level: {}",
            display_opt(self.required_player_level)
        )?;
        writeln!(f, "Crafted: {}", self.crafted)?;
        writeln!(f, "Resistances: {}", resistances.join(", "))?;
        writeln!(f, "Factions: {}", self.factions.join(", "))?;
        writeln!(f, "Required Status: {}", self.required_status)?;
        writeln!(f, "Slots: {}", slots.join(", "))?;
        write!(f, "Available: {}", self.available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_status_table() {
        assert_eq!(required_status_for_item_level(Some(1)), 1);
        assert_eq!(required_status_for_item_level(Some(40)), 3);
        assert_eq!(required_status_for_item_level(Some(50)), 4);
        assert_eq!(required_status_for_item_level(Some(65)), 3);
        assert_eq!(required_status_for_item_level(Some(70)), 4);
        assert_eq!(required_status_for_item_level(Some(90)), 4);
        assert_eq!(required_status_for_item_level(Some(45)), 0);
        assert_eq!(required_status_for_item_level(None), 0);
    }

    #[test]
    fn test_new_addon_is_invalid() {
        let addon = Addon::new("Ember Band", "Ember Band");
        assert!(!addon.is_valid());
        assert!(!addon.available);
    }

    #[test]
    fn test_validity_needs_slot_and_resistance() {
        let mut addon = Addon::new("Ember Band", "Ember Band");
        addon.resistances.push(ResistanceBonus::new(30.0, "Fire"));
        assert!(!addon.is_valid());

        addon.slots.insert("Ring".to_string());
        assert!(addon.is_valid());

        addon.resistances.clear();
        assert!(!addon.is_valid());
    }

    #[test]
    fn test_apply_derives_status_from_item_level_only() {
        let mut addon = Addon::new("Ember Band", "Ember Band");
        addon.apply(AttributeSet {
            item_level: Some(50),
            required_player_level: Some(40),
            ..AttributeSet::default()
        });
        assert_eq!(addon.required_status, 4);
        assert_eq!(addon.required_player_level, Some(40));
    }

    #[test]
    fn test_display_lists_fields() {
        let mut addon = Addon::new("Ember Band", "Ember Band");
        addon.resistances.push(ResistanceBonus::new(12.5, "Fire"));
        addon.slots.insert("Ring".to_string());
        let text = addon.to_string();
        assert!(text.contains("Name: Ember Band"));
        assert!(text.contains("Item Level: -"));
        assert!(text.contains("Resistances: 12.5% Fire"));
        assert!(text.contains("Slots: Ring"));
    }
}
