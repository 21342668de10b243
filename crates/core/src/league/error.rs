use thiserror::Error;

/// Errors raised while encoding or decoding league records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LeagueError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Missing or invalid field: {0}")]
    MissingField(&'static str),
    #[error("Unknown record kind for sort key: {0}")]
    UnknownRecordKind(String),
    #[error("Malformed partition {partition_key}: {reason}")]
    MalformedPartition {
        partition_key: String,
        reason: String,
    },
}

/// Result type for league encoding operations.
pub type Result<T> = std::result::Result<T, LeagueError>;
