//! callbrief - Post-call summaries for customer calls
//!
//! Matches a call transcript to a customer record by phone number and asks a
//! generative text service for the key discussions and a closing summary.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod contacts;
pub mod llm;
pub mod storage;

pub use analysis::{analyze_call, AnalysisError, AnalysisOutcome, CallAnalyzer, CallInput, FailureKind};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "callbrief";
