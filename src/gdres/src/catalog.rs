//! Addon catalog for a single item export
//!
//! Drives the pipeline for one file: clean, segment, extract, drop invalid
//! records, then flag availability once player progression is known.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::addon::{Addon, AddonClass};
use crate::availability::{is_available, AvailabilityError, Denylist, ProgressionSnapshot};
use crate::extract::AttributeExtractor;
use crate::segment::{clean_lines, segment, CleaningRules};

/// All valid addons of one class parsed from one export
#[derive(Debug, Clone)]
pub struct Catalog {
    class: AddonClass,
    addons: Vec<Addon>,
    snapshot: Option<ProgressionSnapshot>,
    denylist: Denylist,
}

impl Catalog {
    /// Parse an export held in memory
    pub fn parse(
        content: &str,
        class: AddonClass,
        rules: &CleaningRules,
        extractor: &dyn AttributeExtractor,
    ) -> Self {
        let lines = clean_lines(content, rules);
        let blocks = segment(&lines);
        debug!(%class, lines = lines.len(), blocks = blocks.len(), "segmented export");

        let mut addons = Vec::with_capacity(blocks.len());
        for block in &blocks {
            let mut addon = Addon::new(block.name.clone(), block.raw_text(&lines));
            addon.apply(extractor.extract(&addon.raw_text));

            if addon.is_valid() {
                addons.push(addon);
            } else {
                debug!(name = %addon.name, "dropping record without slots or resistances");
            }
        }

        Self {
            class,
            addons,
            snapshot: None,
            denylist: Denylist::default(),
        }
    }

    /// Read and parse an export file
    pub fn load<P: AsRef<Path>>(
        path: P,
        class: AddonClass,
        rules: &CleaningRules,
        extractor: &dyn AttributeExtractor,
    ) -> Result<Self, std::io::Error> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content, class, rules, extractor))
    }

    pub fn class(&self) -> AddonClass {
        self.class
    }

    pub fn addons(&self) -> &[Addon] {
        &self.addons
    }

    pub fn len(&self) -> usize {
        self.addons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addons.is_empty()
    }

    pub fn set_snapshot(&mut self, snapshot: ProgressionSnapshot) {
        self.snapshot = Some(snapshot);
    }

    pub fn set_denylist(&mut self, denylist: Denylist) {
        self.denylist = denylist;
    }

    /// Flag every addon as available or not
    pub fn check_availability(&mut self) -> Result<(), AvailabilityError> {
        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or(AvailabilityError::MissingSnapshot)?;

        for addon in &mut self.addons {
            addon.available = is_available(addon, snapshot, &self.denylist)?;
        }

        Ok(())
    }

    /// Addons the player can currently use
    pub fn available(&self) -> impl Iterator<Item = &Addon> {
        self.addons.iter().filter(|a| a.available)
    }
}
