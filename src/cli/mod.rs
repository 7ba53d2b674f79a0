//! CLI module for callbrief
//!
//! Contains argument parsing and command implementations.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ConfigCommand};
