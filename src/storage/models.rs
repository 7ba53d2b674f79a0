//! Data models for storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisOutcome, CallInput, FailureKind};

/// Status label stored for successful analyses
pub const STATUS_SUCCESS: &str = "success";

/// One analysed call, as kept in the history log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Unique identifier (UUID)
    pub id: String,

    /// Phone number the call was matched on (trimmed)
    pub phone_number: String,

    /// Raw call transcript
    pub call_text: String,

    /// `success` or a failure kind label
    pub status: String,

    /// Composed summary, for successful analyses
    pub summary: Option<String>,

    /// Failure message, for failed analyses
    pub error: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Build a history entry for an analysed call
    pub fn from_outcome(input: &CallInput, outcome: &AnalysisOutcome) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            phone_number: input.phone_number().trim().to_string(),
            call_text: input.text().to_string(),
            status: outcome.status().to_string(),
            summary: outcome.summary().map(str::to_string),
            error: outcome.error().map(|e| e.to_string()),
            created_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Failure kind, when the status names one
    pub fn failure_kind(&self) -> Option<FailureKind> {
        FailureKind::from_label(&self.status)
    }
}
