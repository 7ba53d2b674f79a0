//! Call analysis for callbrief
//!
//! Matches the caller in the contact store, asks the generative service for
//! the key discussions and a closing summary, and folds every failure into an
//! [`AnalysisOutcome`].

mod compose;
mod extract;
mod outcome;
mod pipeline;

pub use compose::compose_summary;
pub use extract::{extract_fields, MarkerExtractor, ResponseExtractor};
pub use outcome::{AnalysisError, AnalysisOutcome, CallInput, ExtractedFields, FailureKind};
pub use pipeline::{analyze_call, CallAnalyzer};
