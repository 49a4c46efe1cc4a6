//! Item export inspection command

use crate::cli::OutputFormat;
use crate::config::Config;
use anyhow::{Context, Result};
use gdres::{tables, AddonClass, Catalog, CleaningRules, Denylist, GrimDawnExtractor};
use std::path::Path;

/// Handle the parse command
pub fn handle(
    input: &Path,
    class: AddonClass,
    stats: Option<&Path>,
    all: bool,
    format: OutputFormat,
) -> Result<()> {
    let config = Config::load()?;
    let mut catalog = Catalog::load(input, class, &CleaningRules::default(), &GrimDawnExtractor)
        .with_context(|| format!("Failed to read item export {}", input.display()))?;

    let only_available = match stats {
        Some(stats_path) => {
            let snapshot = tables::load_progression(stats_path).with_context(|| {
                format!("Failed to load player stats from {}", stats_path.display())
            })?;
            catalog.set_snapshot(snapshot);
            catalog.set_denylist(Denylist::default().with_names(config.unobtainable));
            catalog
                .check_availability()
                .context("Failed to evaluate availability")?;
            !all
        }
        None => false,
    };

    let addons: Vec<_> = catalog
        .addons()
        .iter()
        .filter(|a| !only_available || a.available)
        .collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&addons)?);
        }
        OutputFormat::Text => {
            for (i, addon) in addons.iter().enumerate() {
                println!("{} {}:", class, i + 1);
                println!("{}", addon);
                println!("{}", "-".repeat(50));
            }
            println!("{} {} record(s)", addons.len(), class.to_string().to_lowercase());
        }
    }

    Ok(())
}
