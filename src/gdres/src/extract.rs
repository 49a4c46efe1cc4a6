//! Attribute extraction from raw item blocks
//!
//! Everything here is pattern matching over semi-structured prose. The
//! [`AttributeExtractor`] trait keeps the rules swappable per export dialect.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::addon::ResistanceBonus;
use crate::segment::blueprint_heading;
use crate::slots::derive_slots;

const ITEM_LEVEL_LABEL: &str = "Item Level: ";
const REQUIRED_LEVEL_LABEL: &str = "Required Player Level: ";

/// Section headers after which bonuses describe pets or skills, not the wearer
pub const PLAYER_SECTION_ENDS: &[&str] = &["Granted Skills", "Bonus to All Pets"];

static RESISTANCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)%\s+([A-Z][a-z]+(?:\s+&\s+[A-Z][a-z]+|\s+[A-Z][a-z]+)?)\s+Resistance")
        .unwrap()
});
static FACTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^Faction:[ \t]+(.+?)[ \t]*$").unwrap());

/// Fields derived from one raw block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSet {
    pub item_level: Option<i64>,
    pub required_player_level: Option<i64>,
    pub crafted: bool,
    pub resistances: Vec<ResistanceBonus>,
    pub factions: Vec<String>,
    pub slots: BTreeSet<String>,
}

/// Derives structured attributes from a raw item block
pub trait AttributeExtractor {
    /// Extract attributes from a block whose first line is the item name
    fn extract(&self, block: &str) -> AttributeSet;
}

/// Rules for the Grim Dawn item export
#[derive(Debug, Clone, Copy, Default)]
pub struct GrimDawnExtractor;

impl AttributeExtractor for GrimDawnExtractor {
    fn extract(&self, block: &str) -> AttributeSet {
        let mut lines = block.lines();
        let name = lines.next().unwrap_or_default();
        let blueprint = blueprint_heading(name);

        let mut attrs = AttributeSet::default();
        for line in lines {
            if attrs.item_level.is_none() {
                attrs.item_level = labeled_value(line, ITEM_LEVEL_LABEL);
            }
            if attrs.required_player_level.is_none() {
                attrs.required_player_level = labeled_value(line, REQUIRED_LEVEL_LABEL);
            }
            if line == blueprint {
                attrs.crafted = true;
            }
        }

        let player_text = player_section(block);
        attrs.resistances = resistances(player_text);
        attrs.factions = factions(player_text);
        attrs.slots = derive_slots(block);
        attrs
    }
}

/// Integer following `label` on a line, if the line carries it
fn labeled_value(line: &str, label: &str) -> Option<i64> {
    let (_, value) = line.split_once(label)?;
    value.trim().parse().ok()
}

/// The part of a block that describes the wearer
pub fn player_section(block: &str) -> &str {
    let cut = PLAYER_SECTION_ENDS
        .iter()
        .filter_map(|header| block.find(header))
        .min()
        .unwrap_or(block.len());
    &block[..cut]
}

/// Every resistance bonus in document order
pub fn resistances(text: &str) -> Vec<ResistanceBonus> {
    RESISTANCE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let magnitude = caps[1].parse().ok()?;
            Some(ResistanceBonus::new(magnitude, &caps[2]))
        })
        .collect()
}

/// Faction names from `Faction:` lines in document order
pub fn factions(text: &str) -> Vec<String> {
    FACTION_PATTERN
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}
