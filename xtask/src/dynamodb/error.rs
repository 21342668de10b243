//! Error types for DynamoDB operations.

use thiserror::Error;

/// Result type alias for dynamodb module.
pub type Result<T> = std::result::Result<T, DynamodbError>;

/// Errors that can occur during DynamoDB operations.
#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Table '{table_name}' exists with a different key schema")]
    KeySchemaMismatch { table_name: String },

    #[error("Table '{table_name}' is {status} and cannot serve requests")]
    TableUnusable { table_name: String, status: String },

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Timeout waiting for table '{table_name}' to become {expected}")]
    TableWaitTimeout {
        table_name: String,
        expected: &'static str,
    },
}
