//! Core CLI definitions

use clap::{Parser, Subcommand, ValueEnum};
use gdres::AddonClass;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gdres")]
#[command(about = "Grim Dawn resistance planner", long_about = None)]
pub struct Cli {
    /// Log pipeline decisions to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse an item export and list the records found
    #[command(visible_alias = "p")]
    Parse {
        /// Path to the raw item export
        input: PathBuf,

        /// Item class held by the export
        #[arg(short, long, value_enum, default_value_t = ClassArg::Component)]
        class: ClassArg,

        /// Player progression CSV; enables availability checks
        #[arg(short, long)]
        stats: Option<PathBuf>,

        /// With --stats, also list items the player cannot get
        #[arg(short, long)]
        all: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Pick components and augments that reach the resistance goals
    #[command(visible_alias = "o")]
    Optimize {
        /// Slot table CSV (Name, Component, Augment)
        #[arg(long)]
        slots: Option<PathBuf>,

        /// Resistance goal CSV (Name, Current, Goal)
        #[arg(long)]
        goals: Option<PathBuf>,

        /// Raw component export
        #[arg(long)]
        components: Option<PathBuf>,

        /// Raw augment export
        #[arg(long)]
        augments: Option<PathBuf>,

        /// Player progression CSV
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Place components before augments
        #[arg(long)]
        components_first: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Configure default input files
    #[command(visible_alias = "c")]
    Configure {
        /// Default slot table
        #[arg(long)]
        slots: Option<PathBuf>,

        /// Default resistance goal table
        #[arg(long)]
        goals: Option<PathBuf>,

        /// Default component export
        #[arg(long)]
        components: Option<PathBuf>,

        /// Default augment export
        #[arg(long)]
        augments: Option<PathBuf>,

        /// Default player progression table
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Mark an item as unobtainable (repeatable)
        #[arg(long = "deny", value_name = "NAME")]
        deny: Vec<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ClassArg {
    #[default]
    Component,
    Augment,
}

impl From<ClassArg> for AddonClass {
    fn from(arg: ClassArg) -> Self {
        match arg {
            ClassArg::Component => AddonClass::Component,
            ClassArg::Augment => AddonClass::Augment,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
