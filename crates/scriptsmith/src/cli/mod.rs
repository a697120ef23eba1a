//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the scriptsmith binary.

mod commands;
mod generate;

pub use commands::{Cli, Commands, OutputFormat, ScriptOptions};
pub use generate::{emit, run_active, run_fields, run_generate, run_lead, show_tiers};
