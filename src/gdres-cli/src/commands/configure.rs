//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up gdres defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Input file defaults given on the command line
#[derive(Debug, Default)]
pub struct DefaultPaths {
    pub slots: Option<PathBuf>,
    pub goals: Option<PathBuf>,
    pub components: Option<PathBuf>,
    pub augments: Option<PathBuf>,
    pub stats: Option<PathBuf>,
}

impl DefaultPaths {
    fn is_empty(&self) -> bool {
        self.slots.is_none()
            && self.goals.is_none()
            && self.components.is_none()
            && self.augments.is_none()
            && self.stats.is_none()
    }
}

/// Handle the configure command
///
/// # Arguments
/// * `paths` - Default input files to store
/// * `deny` - Item names to add to the unobtainable list
/// * `show` - If true, show current configuration
pub fn handle(paths: DefaultPaths, deny: Vec<String>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if paths.is_empty() && deny.is_empty() {
        show_usage();
        return Ok(());
    }

    apply(&mut config, paths, deny);
    config.save()?;

    println!("Configuration updated");
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Merge new defaults into the configuration
fn apply(config: &mut Config, paths: DefaultPaths, deny: Vec<String>) {
    if paths.slots.is_some() {
        config.slots = paths.slots;
    }
    if paths.goals.is_some() {
        config.goals = paths.goals;
    }
    if paths.components.is_some() {
        config.components = paths.components;
    }
    if paths.augments.is_some() {
        config.augments = paths.augments;
    }
    if paths.stats.is_some() {
        config.stats = paths.stats;
    }
    for name in deny {
        config.add_unobtainable(name);
    }
}

fn show_path(label: &str, path: Option<&PathBuf>) {
    match path {
        Some(p) => println!("{:<12} {}", label, p.display()),
        None => println!("{:<12} (not set)", label),
    }
}

/// Display current configuration
fn show_config(config: &Config) {
    show_path("Slots:", config.slots.as_ref());
    show_path("Goals:", config.goals.as_ref());
    show_path("Components:", config.components.as_ref());
    show_path("Augments:", config.augments.as_ref());
    show_path("Stats:", config.stats.as_ref());

    if !config.unobtainable.is_empty() {
        println!("Unobtainable: {}", config.unobtainable.join(", "));
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: gdres configure --slots FILE --goals FILE --stats FILE");
    println!("   or: gdres configure --components FILE --augments FILE");
    println!("   or: gdres configure --deny \"Item Name\"");
    println!("   or: gdres configure --show");
}
