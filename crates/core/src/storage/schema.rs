//! Key layout of a stored table.

use super::error::{RepositoryError, Result};
use super::types::ItemQuery;

/// Attribute names of a table's primary key and local secondary indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub partition_key: &'static str,
    /// `None` for tables keyed by the partition key alone.
    pub sort_key: Option<&'static str>,
    pub indexes: &'static [LocalIndex],
}

/// A local secondary index: same partition key, another sort attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalIndex {
    pub name: &'static str,
    pub sort_key: &'static str,
}

impl TableSchema {
    /// Looks up a local secondary index by name.
    pub fn index(&self, name: &str) -> Option<&LocalIndex> {
        self.indexes.iter().find(|index| index.name == name)
    }

    /// The attribute a query orders by and applies its condition to.
    ///
    /// Fails for an index the table does not have.
    pub fn range_attribute(&self, query: &ItemQuery) -> Result<Option<&'static str>> {
        match &query.index {
            None => Ok(self.sort_key),
            Some(name) => self
                .index(name)
                .map(|index| Some(index.sort_key))
                .ok_or_else(|| RepositoryError::QueryFailed(format!("unknown index: {name}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: TableSchema = TableSchema {
        partition_key: "Team",
        sort_key: Some("PlayerName"),
        indexes: &[LocalIndex {
            name: "TeamSalary",
            sort_key: "Salary",
        }],
    };

    #[test]
    fn test_range_attribute_of_base_table_and_index() {
        assert_eq!(
            SCHEMA.range_attribute(&ItemQuery::partition("Phillies")),
            Ok(Some("PlayerName"))
        );
        assert_eq!(
            SCHEMA.range_attribute(&ItemQuery::partition("Phillies").index("TeamSalary")),
            Ok(Some("Salary"))
        );
    }

    #[test]
    fn test_unknown_index_is_rejected() {
        let result = SCHEMA.range_attribute(&ItemQuery::partition("Phillies").index("ByWins"));
        assert_eq!(
            result,
            Err(RepositoryError::QueryFailed("unknown index: ByWins".to_string()))
        );
    }

    #[test]
    fn test_hash_only_table_has_no_range_attribute() {
        let schema = TableSchema {
            partition_key: "TeamName",
            sort_key: None,
            indexes: &[],
        };
        assert_eq!(
            schema.range_attribute(&ItemQuery::partition("team_Phillies")),
            Ok(None)
        );
        assert!(schema.index("TeamSalary").is_none());
    }
}
