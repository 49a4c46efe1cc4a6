//! Availability rules against the player's progression
//!
//! Decides whether the player can actually get an addon: unobtainable items,
//! level gates, crafting unlocks and faction reputation, in that order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::addon::Addon;

/// Counter holding the player's overall level
pub const PLAYER_LEVEL_KEY: &str = "player_level";

/// Counter that is nonzero once blueprints can be crafted
pub const CRAFTING_KEY: &str = "crafts";

/// Items that look purchasable in the export but cannot be obtained
pub const UNOBTAINABLE: &[&str] = &[
    "Ugdenbog Leather",
    "Spellscorched Plating",
    "Titan Plating",
    "Tainted Heart",
    "Sacred Plating",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Player progression has not been set")]
    MissingSnapshot,

    #[error("Addon '{name}' has no required player level")]
    MissingRequiredLevel { name: String },

    #[error("Player progression is missing the '{key}' counter")]
    MissingCounter { key: String },
}

/// Flat named counters describing how far the player has progressed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionSnapshot {
    counters: HashMap<String, i64>,
}

impl ProgressionSnapshot {
    pub fn new(counters: HashMap<String, i64>) -> Self {
        Self { counters }
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.counters.get(key).copied()
    }

    pub fn set(&mut self, key: impl Into<String>, value: i64) {
        self.counters.insert(key.into(), value);
    }

    pub fn player_level(&self) -> Result<i64, AvailabilityError> {
        self.get(PLAYER_LEVEL_KEY)
            .ok_or_else(|| AvailabilityError::MissingCounter {
                key: PLAYER_LEVEL_KEY.to_string(),
            })
    }

    pub fn can_craft(&self) -> bool {
        self.get(CRAFTING_KEY).is_some_and(|v| v != 0)
    }

    /// Reputation tier for a faction display name
    pub fn faction_tier(&self, faction: &str) -> Option<i64> {
        faction_keys(faction)
            .iter()
            .find_map(|key| self.get(key))
    }
}

impl FromIterator<(String, i64)> for ProgressionSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Counter keys a faction display name may be stored under.
///
/// `Devil's Crossing` is looked up as `devils_crossing`, then `devilscrossing`.
pub fn faction_keys(faction: &str) -> [String; 2] {
    let base = faction.trim().to_lowercase().replace('\'', "");
    [base.replace(' ', "_"), base.replace(' ', "")]
}

/// Names that are never available
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denylist {
    names: Vec<String>,
}

impl Default for Denylist {
    fn default() -> Self {
        Self {
            names: UNOBTAINABLE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Denylist {
    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

/// Decide whether the player can obtain `addon`
pub fn is_available(
    addon: &Addon,
    snapshot: &ProgressionSnapshot,
    denylist: &Denylist,
) -> Result<bool, AvailabilityError> {
    if denylist.contains(&addon.name) {
        return Ok(false);
    }

    let required_level =
        addon
            .required_player_level
            .ok_or_else(|| AvailabilityError::MissingRequiredLevel {
                name: addon.name.clone(),
            })?;
    if required_level > snapshot.player_level()? {
        return Ok(false);
    }

    if addon.crafted && snapshot.can_craft() {
        return Ok(true);
    }

    let reputable = addon.factions.iter().any(|faction| {
        snapshot
            .faction_tier(faction)
            .is_some_and(|tier| tier >= addon.required_status)
    });
    if reputable {
        return Ok(true);
    }

    Ok(addon.factions.is_empty())
}
