//! DynamoDB storage backend.
//!
//! Implements `ItemStore` against one table per store. Key attribute names
//! come from the store's `TableSchema`: the shared league table (`TeamName` /
//! `SK`), or the team and player tables of the multi-table layout, whose
//! `TeamSalary` index is queried by name. Create the tables with
//! `cargo xtask dynamodb deploy [--layout multi-table]`.

mod conversions;
mod error;
mod store;

pub use store::{create_client, DynamoDbStore};
