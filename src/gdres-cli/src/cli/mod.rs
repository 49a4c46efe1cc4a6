//! CLI argument definitions for gdres
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod core;

pub use core::{Cli, ClassArg, Commands, OutputFormat};
