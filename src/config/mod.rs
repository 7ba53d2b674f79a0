//! Configuration module for callbrief
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{ContactSettings, GeneralSettings, HistorySettings, LlmSettings, Settings};
