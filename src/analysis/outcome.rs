//! Pipeline inputs, errors and outcomes

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One call to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallInput {
    text: String,
    phone_number: String,
    store_path: PathBuf,
}

impl CallInput {
    pub fn new(
        text: impl Into<String>,
        phone_number: impl Into<String>,
        store_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            text: text.into(),
            phone_number: phone_number.into(),
            store_path: store_path.into(),
        }
    }

    /// Raw call transcript
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Phone number as supplied by the caller
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Location of the contact store
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }
}

/// Fields pulled out of a generated response. Both are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub discussion_points: String,
    pub summary_intent: String,
}

/// Category of a failed analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NoMatch,
    StoreError,
    ServiceError,
    EmptyResponse,
    ParseError,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoMatch => "no_match",
            Self::StoreError => "store_error",
            Self::ServiceError => "service_error",
            Self::EmptyResponse => "empty_response",
            Self::ParseError => "parse_error",
        }
    }

    /// Parse a stored status label back into a kind.
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "no_match" => Some(Self::NoMatch),
            "store_error" => Some(Self::StoreError),
            "service_error" => Some(Self::ServiceError),
            "empty_response" => Some(Self::EmptyResponse),
            "parse_error" => Some(Self::ParseError),
            _ => None,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an analysis did not produce a summary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No matching contact found for phone number '{phone_number}'")]
    NoMatch { phone_number: String },

    #[error("Could not load contact store: {0}")]
    Store(String),

    #[error("Generative service call failed: {0}")]
    Service(String),

    #[error("The response from the generative service is empty")]
    EmptyResponse,

    #[error("Could not parse the key discussions and summary from the response")]
    Parse { raw_response: String },
}

impl AnalysisError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NoMatch { .. } => FailureKind::NoMatch,
            Self::Store(_) => FailureKind::StoreError,
            Self::Service(_) => FailureKind::ServiceError,
            Self::EmptyResponse => FailureKind::EmptyResponse,
            Self::Parse { .. } => FailureKind::ParseError,
        }
    }

    /// Raw generated text kept for diagnostics, when there was one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::Parse { raw_response } => Some(raw_response.as_str()),
            _ => None,
        }
    }
}

/// Result of one pipeline run. Never partial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Success(String),
    Failure(AnalysisError),
}

impl AnalysisOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn summary(&self) -> Option<&str> {
        match self {
            Self::Success(summary) => Some(summary.as_str()),
            Self::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.error().map(AnalysisError::kind)
    }

    /// Short status label: `success` or the failure kind.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Failure(err) => err.kind().as_str(),
        }
    }
}

impl From<Result<String, AnalysisError>> for AnalysisOutcome {
    fn from(result: Result<String, AnalysisError>) -> Self {
        match result {
            Ok(summary) => Self::Success(summary),
            Err(err) => Self::Failure(err),
        }
    }
}

impl Serialize for AnalysisOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        #[serde(tag = "status", rename_all = "snake_case")]
        enum View<'a> {
            Success {
                summary: &'a str,
            },
            Failure {
                kind: FailureKind,
                message: String,
                #[serde(skip_serializing_if = "Option::is_none")]
                raw_response: Option<&'a str>,
            },
        }

        let view = match self {
            Self::Success(summary) => View::Success {
                summary: summary.as_str(),
            },
            Self::Failure(err) => View::Failure {
                kind: err.kind(),
                message: err.to_string(),
                raw_response: err.raw_response(),
            },
        };
        view.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_kind_round_trips_through_labels() {
        for kind in [
            FailureKind::NoMatch,
            FailureKind::StoreError,
            FailureKind::ServiceError,
            FailureKind::EmptyResponse,
            FailureKind::ParseError,
        ] {
            assert_eq!(FailureKind::from_label(kind.as_str()), Some(kind));
        }
        assert_eq!(FailureKind::from_label("success"), None);
    }

    #[test]
    fn parse_error_keeps_raw_response() {
        let err = AnalysisError::Parse {
            raw_response: "Key Discussions: only".to_string(),
        };
        assert_eq!(err.kind(), FailureKind::ParseError);
        assert_eq!(err.raw_response(), Some("Key Discussions: only"));
        assert_eq!(AnalysisError::EmptyResponse.raw_response(), None);
    }

    #[test]
    fn outcome_accessors() {
        let ok = AnalysisOutcome::Success("done".to_string());
        assert!(ok.is_success());
        assert_eq!(ok.summary(), Some("done"));
        assert_eq!(ok.status(), "success");
        assert_eq!(ok.failure_kind(), None);

        let failed: AnalysisOutcome = Err::<String, _>(AnalysisError::NoMatch {
            phone_number: "000".to_string(),
        })
        .into();
        assert!(!failed.is_success());
        assert_eq!(failed.status(), "no_match");
        assert_eq!(failed.failure_kind(), Some(FailureKind::NoMatch));
        assert!(failed
            .error()
            .map(|e| e.to_string().contains("No matching contact"))
            .unwrap_or(false));
    }

    #[test]
    fn outcome_serializes_as_tagged_json() {
        let ok = serde_json::to_value(AnalysisOutcome::Success("s".to_string())).unwrap();
        assert_eq!(ok, json!({ "status": "success", "summary": "s" }));

        let failed = serde_json::to_value(AnalysisOutcome::Failure(AnalysisError::Parse {
            raw_response: "raw".to_string(),
        }))
        .unwrap();
        assert_eq!(failed["status"], "failure");
        assert_eq!(failed["kind"], "parse_error");
        assert_eq!(failed["raw_response"], "raw");

        let empty = serde_json::to_value(AnalysisOutcome::Failure(AnalysisError::EmptyResponse))
            .unwrap();
        assert!(empty.get("raw_response").is_none());
    }
}
