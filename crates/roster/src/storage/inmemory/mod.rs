//! In-memory storage backend.
//!
//! Records live in a `BTreeMap` keyed by `(partition, sort key)` and wrapped
//! in `Arc<RwLock<_>>`, so range queries walk keys in sort order the same
//! way a DynamoDB partition does. Queries against a local secondary index
//! sort the partition by the index attribute instead. Nothing is persisted.
//!
//! # Example
//!
//! ```rust,ignore
//! use roster::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! let service = LeagueService::new(store, SalaryEncoding::Padded);
//! ```

mod store;

pub use store::InMemoryStore;
