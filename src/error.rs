//! Error types for persuasion-lens.

use thiserror::Error;

/// Result type alias for persuasion-lens operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Generic message shown when the backend fails without saying why.
pub const GENERIC_FAILURE: &str = "Analysis failed";

/// Input rejected before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter at least {min} characters of text to analyze.")]
    TooShort { min: usize, actual: usize },
}

/// Anything that goes wrong between sending the request and decoding the reply.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Connection refused, DNS failure, broken pipe.
    #[error("{0}")]
    Transport(String),

    /// Non-2xx status. `message` is the backend's `error` field or the generic fallback.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// 2xx status whose body is not an analysis result.
    #[error("invalid response from analysis service: {0}")]
    InvalidResponse(String),
}

impl RequestError {
    /// Text for the blocking notice.
    pub fn notice(&self) -> String {
        format!("Error: {}", self)
    }
}

/// Top-level error for the library and binary.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),

    /// A submission arrived while the trigger was disabled.
    #[error("an analysis is already in progress")]
    Busy,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("server error: {0}")]
    Server(String),
}
