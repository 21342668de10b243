use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single stored attribute value.
///
/// Only the two scalar types the league model needs are represented. Numbers
/// are carried as decimal strings, the way DynamoDB transmits them, so any
/// integer width survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttributeValue {
    S(String),
    N(String),
}

impl AttributeValue {
    /// Builds a number attribute from any integer.
    pub fn number(n: impl ToString) -> Self {
        AttributeValue::N(n.to_string())
    }

    /// Returns the string payload, if this is a string attribute.
    pub fn as_s(&self) -> Option<&str> {
        match self {
            AttributeValue::S(s) => Some(s),
            AttributeValue::N(_) => None,
        }
    }

    /// Returns the numeric payload, if this is a number attribute.
    pub fn as_n(&self) -> Option<&str> {
        match self {
            AttributeValue::N(n) => Some(n),
            AttributeValue::S(_) => None,
        }
    }
}

/// A raw stored record: a flat mapping of attribute name to value.
pub type Record = BTreeMap<String, AttributeValue>;

/// Composite primary key of a stored record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    pub partition_key: String,
    pub sort_key: String,
}

impl ItemKey {
    pub fn new(partition_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: sort_key.into(),
        }
    }

    /// Key of a table without a sort key. The sort key is left empty.
    pub fn partition_only(partition_key: impl Into<String>) -> Self {
        Self::new(partition_key, "")
    }
}

/// Predicate applied to sort keys within one partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKeyCondition {
    /// Every record in the partition.
    Any,
    /// Only the record whose sort key equals the value.
    Equals(String),
    /// Records whose sort key starts with the prefix.
    BeginsWith(String),
}

impl SortKeyCondition {
    /// Returns true if `sort_key` satisfies this condition.
    pub fn matches(&self, sort_key: &str) -> bool {
        match self {
            SortKeyCondition::Any => true,
            SortKeyCondition::Equals(expected) => sort_key == expected,
            SortKeyCondition::BeginsWith(prefix) => sort_key.starts_with(prefix.as_str()),
        }
    }
}

/// Order in which a partition query returns records, by sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryOrder {
    #[default]
    Ascending,
    Descending,
}

/// A range query within a single partition.
///
/// With `index` set, the query runs against a local secondary index: records
/// come back ordered by the index's sort attribute and `condition` applies to
/// that attribute. Records without it are not in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub partition_key: String,
    pub index: Option<String>,
    pub condition: SortKeyCondition,
    pub order: QueryOrder,
    /// Maximum number of records to return. `None` returns the whole range.
    pub limit: Option<u32>,
}

impl ItemQuery {
    /// Creates an ascending, unbounded query over a whole partition.
    pub fn partition(partition_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            index: None,
            condition: SortKeyCondition::Any,
            order: QueryOrder::Ascending,
            limit: None,
        }
    }

    /// Runs the query against the named local secondary index.
    pub fn index(mut self, index_name: impl Into<String>) -> Self {
        self.index = Some(index_name.into());
        self
    }

    /// Restricts the query to sort keys starting with `prefix`.
    pub fn begins_with(mut self, prefix: impl Into<String>) -> Self {
        self.condition = SortKeyCondition::BeginsWith(prefix.into());
        self
    }

    /// Restricts the query to the sort key equal to `sort_key`.
    pub fn equals(mut self, sort_key: impl Into<String>) -> Self {
        self.condition = SortKeyCondition::Equals(sort_key.into());
        self
    }

    /// Sets the order of the result.
    pub fn order(mut self, order: QueryOrder) -> Self {
        self.order = order;
        self
    }

    /// Returns records from highest to lowest sort key.
    pub fn descending(self) -> Self {
        self.order(QueryOrder::Descending)
    }

    /// Caps the number of returned records.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
