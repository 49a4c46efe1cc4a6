//! Equipment slots and slot hint parsing
//!
//! Components say where they go with `(Used in ...)`, augments with
//! `(Applied to ...)`. The phrases inside are mapped to canonical slot names.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::trace;

use crate::addon::AddonClass;

/// Every armor slot, in the order the game lists them
pub const ARMOR_SLOTS: &[&str] = &["Head", "Body", "Leg", "Shoulder", "Arm", "Feet", "Belt"];

const HEAD: &[&str] = &["Head"];
const BODY: &[&str] = &["Body"];
const LEG: &[&str] = &["Leg"];
const SHOULDER: &[&str] = &["Shoulder"];
const ARM: &[&str] = &["Arm"];
const FEET: &[&str] = &["Feet"];
const RING: &[&str] = &["Ring"];
const AMULET: &[&str] = &["Amulet"];
const MEDAL: &[&str] = &["Medal"];

/// Hint phrase (lowercase) -> canonical slot names
pub static SLOT_SYNONYMS: phf::Map<&'static str, &'static [&'static str]> = phf::phf_map! {
    "all armor" => ARMOR_SLOTS,
    "head" => HEAD,
    "head armor" => HEAD,
    "chest" => BODY,
    "chest armor" => BODY,
    "leg" => LEG,
    "leg armor" => LEG,
    "shoulder" => SHOULDER,
    "shoulder armor" => SHOULDER,
    "hand" => ARM,
    "hand armor" => ARM,
    "boots" => FEET,
    "rings" => RING,
    "amulets" => AMULET,
    "medals" => MEDAL,
};

static COMPONENT_HINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(Used in ([^)\n]*)\)").unwrap());
static AUGMENT_HINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(Applied to ([^)\n]*)\)").unwrap());
static HINT_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*|\s+and\s+").unwrap());

/// An equipment slot and the addon classes it accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    pub accepts_component: bool,
    pub accepts_augment: bool,
}

impl Slot {
    pub fn new(name: impl Into<String>, accepts_component: bool, accepts_augment: bool) -> Self {
        Self {
            name: name.into(),
            accepts_component,
            accepts_augment,
        }
    }

    pub fn accepts(&self, class: AddonClass) -> bool {
        match class {
            AddonClass::Component => self.accepts_component,
            AddonClass::Augment => self.accepts_augment,
        }
    }
}

/// Canonical slots for a single hint phrase, if the phrase is known
pub fn slots_for_phrase(phrase: &str) -> Option<&'static [&'static str]> {
    SLOT_SYNONYMS
        .get(phrase.trim().to_lowercase().as_str())
        .copied()
}

/// The item list of the first slot hint in a block, component hint first
pub fn slot_hint(block: &str) -> Option<&str> {
    COMPONENT_HINT
        .captures(block)
        .or_else(|| AUGMENT_HINT.captures(block))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Derive the canonical slots an addon fits from its raw block
pub fn derive_slots(block: &str) -> BTreeSet<String> {
    let mut slots = BTreeSet::new();
    let Some(hint) = slot_hint(block) else {
        return slots;
    };

    for phrase in HINT_SEPARATOR.split(hint) {
        match slots_for_phrase(phrase) {
            Some(names) => slots.extend(names.iter().map(|s| s.to_string())),
            None => trace!(phrase, "unrecognized slot phrase"),
        }
    }

    slots
}
