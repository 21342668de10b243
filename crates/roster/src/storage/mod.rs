//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `ItemStore` trait
//! defined in `roster_core::storage`. The implementation is selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local store, lost on exit
//! - `dynamodb`: AWS DynamoDB store using `aws-sdk-dynamodb`
//!
//! These features are mutually exclusive.
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p roster --no-default-features --features dynamodb
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb' feature. \
    Example: cargo build -p roster --features inmemory"
);

#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

use anyhow::Result;
use roster_core::storage::TableSchema;

use crate::config::Config;

/// Opens one in-memory table.
#[cfg(feature = "inmemory")]
pub async fn open(
    _config: &Config,
    table_name: &str,
    schema: TableSchema,
) -> Result<inmemory::InMemoryStore> {
    tracing::info!(
        table = %table_name,
        "Using in-memory store; records are dropped on exit"
    );
    Ok(inmemory::InMemoryStore::with_schema(schema))
}

/// Opens one DynamoDB table.
#[cfg(feature = "dynamodb")]
pub async fn open(
    config: &Config,
    table_name: &str,
    schema: TableSchema,
) -> Result<dynamodb::DynamoDbStore> {
    let client = dynamodb::create_client(config).await;
    tracing::info!(table = %table_name, "Using DynamoDB store");
    Ok(dynamodb::DynamoDbStore::new(client, table_name, schema))
}
