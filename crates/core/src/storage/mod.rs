mod error;
mod schema;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use schema::{LocalIndex, TableSchema};
pub use traits::ItemStore;
pub use types::{AttributeValue, ItemKey, ItemQuery, QueryOrder, Record, SortKeyCondition};
