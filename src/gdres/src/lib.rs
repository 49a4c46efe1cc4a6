//! # gdres
//!
//! Grim Dawn component and augment planner.
//!
//! This library provides functionality to:
//! - Rebuild item records from a free-text item export
//! - Extract resistances, factions, slots and level gates from each record
//! - Decide which items the player can currently obtain
//! - Greedily assign items to equipment slots to reach resistance goals
//!
//! ## Example
//!
//! ```no_run
//! use gdres::{AddonClass, Catalog, CleaningRules, GrimDawnExtractor, Optimizer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rules = CleaningRules::default();
//! let mut components =
//!     Catalog::load("components_raw.txt", AddonClass::Component, &rules, &GrimDawnExtractor)?;
//! components.set_snapshot(gdres::tables::load_progression("stats.csv")?);
//! components.check_availability()?;
//!
//! let slots = gdres::tables::load_slots("slots.csv")?;
//! let goals = gdres::tables::load_goals("resistance.csv")?;
//! let mut optimizer = Optimizer::new(slots, goals);
//! optimizer.add_catalog(&components);
//!
//! let plan = optimizer.run();
//! for outcome in &plan.outcomes {
//!     println!("{}: {:.0}/{}", outcome.name, outcome.total(), outcome.goal);
//! }
//! # Ok(())
//! # }
//! ```

pub mod addon;
pub mod availability;
pub mod catalog;
pub mod extract;
pub mod optimizer;
pub mod segment;
pub mod slots;
pub mod tables;

// Re-export commonly used items
#[doc(inline)]
pub use addon::{required_status_for_item_level, Addon, AddonClass, ResistanceBonus};
#[doc(inline)]
pub use availability::{
    faction_keys, is_available, AvailabilityError, Denylist, ProgressionSnapshot, UNOBTAINABLE,
};
#[doc(inline)]
pub use catalog::Catalog;
#[doc(inline)]
pub use extract::{AttributeExtractor, AttributeSet, GrimDawnExtractor};
#[doc(inline)]
pub use optimizer::{Assignment, Candidate, GoalOutcome, Optimizer, Plan, ResistanceGoal};
#[doc(inline)]
pub use segment::{clean_lines, segment, Block, CleaningRules};
#[doc(inline)]
pub use slots::{derive_slots, Slot};
#[doc(inline)]
pub use tables::TableError;
