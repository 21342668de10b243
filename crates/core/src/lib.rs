//! Functional core for the roster league tables.
//!
//! - [`league`]: key codecs for the single- and multi-table layouts, entity
//!   projections and partition assembly (pure).
//! - [`storage`]: the `ItemStore` port, table schemas and the error type.
//! - [`service`]: `LeagueService` and `MultiTableLeagueService`, the
//!   entity-level façades over stores.

pub mod league;
pub mod service;
pub mod storage;
