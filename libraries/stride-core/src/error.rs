/// Core error types for Stride
use thiserror::Error;

/// Result type alias using `StrideError`
pub type Result<T> = std::result::Result<T, StrideError>;

/// Core error type for Stride
#[derive(Error, Debug)]
pub enum StrideError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Request rejected by a validation rule
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StrideError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Domain-level rejections returned to API clients verbatim.
///
/// The `Display` text of each variant is the exact message clients see, so
/// changing it is a wire-format change.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A date field did not parse to a calendar date
    #[error("Invalid date")]
    InvalidDate,

    /// `from` lies after `to` in a log query
    #[error("Invalid date range: from is after to")]
    InvalidDateRange,

    /// Duration is zero, negative or not a number
    #[error("Invalid duration time")]
    InvalidDuration,

    /// Limit is zero, negative or not an integer
    #[error("Invalid limit value")]
    InvalidLimit,

    /// The referenced user does not exist
    #[error("Unknown user id")]
    UnknownUser,

    /// Another user already owns the requested username
    #[error("Username already taken")]
    UsernameTaken,
}

impl ValidationError {
    /// Whether the rejection concerns a missing entity rather than bad input
    pub fn is_not_found(self) -> bool {
        matches!(self, Self::UnknownUser)
    }

    /// Whether the rejection is a uniqueness conflict
    pub fn is_conflict(self) -> bool {
        matches!(self, Self::UsernameTaken)
    }

    /// Message text sent by the historical API, which some clients match on
    pub fn legacy_message(self) -> String {
        match self {
            Self::UsernameTaken => "Username has already taken".to_string(),
            Self::InvalidDateRange => "TypeError: Invalid date [&from]".to_string(),
            other => other.to_string(),
        }
    }
}
