//! Command handlers for gdres CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod optimize;
pub mod parse;
