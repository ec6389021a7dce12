use axum::http::StatusCode;
use thiserror::Error;

/// Failure classes for the AI completion adapter.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The model signalled via the sentinel name that the subject is not a
    /// food item. Surfaced to the user as "not found", never as a record.
    #[error("no food item found matching the query")]
    NotFood,

    #[error("AI request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("AI response could not be parsed: {0}")]
    InvalidResponse(String),
}

impl AnalysisError {
    pub fn status(&self) -> StatusCode {
        match self {
            AnalysisError::NotFood => StatusCode::NOT_FOUND,
            AnalysisError::Upstream(_) | AnalysisError::InvalidResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// Message shown to the user. Upstream causes stay in the logs only.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::NotFood => "No food item found matching that query".into(),
            AnalysisError::Upstream(_) | AnalysisError::InvalidResponse(_) => {
                "Failed to analyze product".into()
            }
        }
    }
}
