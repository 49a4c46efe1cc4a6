//! Resistance optimization command

use crate::cli::OutputFormat;
use crate::config::{
    Config, DEFAULT_AUGMENTS, DEFAULT_COMPONENTS, DEFAULT_GOALS, DEFAULT_SLOTS, DEFAULT_STATS,
};
use anyhow::{Context, Result};
use gdres::{
    tables, AddonClass, Catalog, CleaningRules, Denylist, GrimDawnExtractor, Optimizer, Plan,
    ProgressionSnapshot,
};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

/// Input files for one optimizer run, as given on the command line
#[derive(Debug, Default)]
pub struct OptimizeArgs {
    pub slots: Option<PathBuf>,
    pub goals: Option<PathBuf>,
    pub components: Option<PathBuf>,
    pub augments: Option<PathBuf>,
    pub stats: Option<PathBuf>,
    pub components_first: bool,
}

/// Handle the optimize command
pub fn handle(args: OptimizeArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    let slots_path = Config::resolve(args.slots, config.slots.as_deref(), DEFAULT_SLOTS);
    let goals_path = Config::resolve(args.goals, config.goals.as_deref(), DEFAULT_GOALS);
    let components_path =
        Config::resolve(args.components, config.components.as_deref(), DEFAULT_COMPONENTS);
    let augments_path =
        Config::resolve(args.augments, config.augments.as_deref(), DEFAULT_AUGMENTS);
    let stats_path = Config::resolve(args.stats, config.stats.as_deref(), DEFAULT_STATS);

    let slots = tables::load_slots(&slots_path)
        .with_context(|| format!("Failed to load slots from {}", slots_path.display()))?;
    let goals = tables::load_goals(&goals_path)
        .with_context(|| format!("Failed to load goals from {}", goals_path.display()))?;
    let snapshot = tables::load_progression(&stats_path)
        .with_context(|| format!("Failed to load player stats from {}", stats_path.display()))?;
    let denylist = Denylist::default().with_names(config.unobtainable);

    let components = load_catalog(
        &components_path,
        AddonClass::Component,
        &snapshot,
        &denylist,
    )?;
    let augments = load_catalog(&augments_path, AddonClass::Augment, &snapshot, &denylist)?;

    let priority = if args.components_first {
        vec![AddonClass::Component, AddonClass::Augment]
    } else {
        vec![AddonClass::Augment, AddonClass::Component]
    };

    let mut optimizer = Optimizer::new(slots, goals).with_priority(priority);
    optimizer.add_catalog(&components);
    optimizer.add_catalog(&augments);
    info!(
        candidates = optimizer.candidates().len(),
        "running optimizer"
    );

    let plan = optimizer.run();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Text => print!("{}", render_plan(&plan, optimizer.priority())),
    }

    Ok(())
}

/// Parse an export and flag what the player can use
fn load_catalog(
    path: &Path,
    class: AddonClass,
    snapshot: &ProgressionSnapshot,
    denylist: &Denylist,
) -> Result<Catalog> {
    let mut catalog = Catalog::load(path, class, &CleaningRules::default(), &GrimDawnExtractor)
        .with_context(|| format!("Failed to read {} export {}", class, path.display()))?;
    catalog.set_snapshot(snapshot.clone());
    catalog.set_denylist(denylist.clone());
    catalog
        .check_availability()
        .with_context(|| format!("Failed to evaluate availability in {}", path.display()))?;

    info!(
        %class,
        parsed = catalog.len(),
        available = catalog.available().count(),
        "loaded export"
    );
    Ok(catalog)
}

/// Text report: assignments grouped by class, then goal totals
pub fn render_plan(plan: &Plan, priority: &[AddonClass]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Best combination:");
    if plan.assignments.is_empty() {
        let _ = writeln!(out, "  (nothing to add)");
    }
    for class in priority {
        for assignment in plan.assignments_for(*class) {
            let _ = writeln!(out, "{} for {}: {}", class, assignment.slot, assignment.addon);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Final resistances:");
    for outcome in &plan.outcomes {
        let _ = writeln!(out, "{}: {:.0}/{}", outcome.name, outcome.total(), outcome.goal);
    }

    out
}
