//! Operator CLI over the storefront permission table.

pub mod commands;

pub use commands::{Cli, Command, Output, load_table, resolve_config, run};
