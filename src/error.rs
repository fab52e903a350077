// src/error.rs

use std::fmt;

/// Global Application Error Enum.
/// Centralizes every failure the client core can surface to its caller.
#[derive(Debug)]
pub enum AppError {
    // External collaborator failure (network error or non-2xx response).
    // Carries the server-provided `detail` message when present, otherwise
    // a generic fallback string. Never retried automatically.
    Api(String),

    // Expired/missing/rejected credentials. Recoverable only by
    // re-authenticating.
    AuthError(String),

    // Recoverable input problem (unanswered question, malformed email,
    // short password). Accumulated state is kept.
    ValidationError(String),

    // Submission refused because some questions have no answer yet.
    Incomplete { missing: usize },

    // An answer was recorded against a question id that does not belong
    // to the active question set.
    InvalidQuestion(String),

    // A submission is already in flight, or the session has already
    // been submitted.
    AlreadySubmitting,

    // A quiz session cannot be started without questions. Fatal to that
    // session; a new question set is required.
    EmptyQuestionSet,

    // Persisted session data could not be written or encoded.
    Storage(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Api(msg) => write!(f, "{}", msg),
            AppError::AuthError(msg) => write!(f, "{}", msg),
            AppError::ValidationError(msg) => write!(f, "{}", msg),
            AppError::Incomplete { missing } => write!(
                f,
                "Please answer all questions before submitting. You have {} unanswered question(s).",
                missing
            ),
            AppError::InvalidQuestion(id) => {
                write!(f, "Question '{}' does not belong to this quiz", id)
            }
            AppError::AlreadySubmitting => write!(f, "A submission is already in progress"),
            AppError::EmptyQuestionSet => write!(f, "No questions available for this quiz"),
            AppError::Storage(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `reqwest::Error` into `AppError::Api`.
/// Allows using `?` operator on HTTP calls.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Api(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Api(err.to_string())
    }
}
