use thiserror::Error;

/// Input rejected by the prompt schema before any storage access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A string field that must contain at least one character was empty.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    /// The payload could not be decoded: wrong primitive type, missing key, bad JSON.
    #[error("malformed input: {0}")]
    Malformed(String),

    /// A date-like value could not be coerced into a timestamp.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
