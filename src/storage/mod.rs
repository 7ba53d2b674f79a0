//! Storage module for callbrief
//!
//! Keeps a SQLite history of analysed calls and their outcomes.

mod database;
mod models;

pub use database::Database;
pub use models::{AnalysisRecord, STATUS_SUCCESS};
