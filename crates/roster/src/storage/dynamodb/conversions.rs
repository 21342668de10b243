//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! stored records. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use roster_core::storage::{self, ItemKey, Record, RepositoryError, SortKeyCondition, TableSchema};

/// A DynamoDB item.
pub type Item = HashMap<String, AttributeValue>;

// ============================================================================
// Record conversions
// ============================================================================

/// Convert a record to a DynamoDB item, writing `key` into the key attributes.
pub fn record_to_item(key: &ItemKey, record: Record, schema: &TableSchema) -> Item {
    let mut item: Item = record
        .into_iter()
        .map(|(name, value)| (name, to_attribute(value)))
        .collect();

    item.extend(key_to_item(key, schema));
    item
}

/// Convert a DynamoDB item to a record.
///
/// Only string and number attributes are representable; anything else is
/// rejected rather than dropped.
pub fn item_to_record(item: &Item) -> storage::Result<Record> {
    item.iter()
        .map(|(name, value)| from_attribute(name, value).map(|v| (name.clone(), v)))
        .collect()
}

/// Build the key map of a GetItem request.
///
/// The sort key is left out for tables keyed by the partition key alone.
pub fn key_to_item(key: &ItemKey, schema: &TableSchema) -> Item {
    let mut item = HashMap::from([(
        schema.partition_key.to_string(),
        AttributeValue::S(key.partition_key.clone()),
    )]);

    if let Some(sort_key) = schema.sort_key {
        item.insert(
            sort_key.to_string(),
            AttributeValue::S(key.sort_key.clone()),
        );
    }

    item
}

fn to_attribute(value: storage::AttributeValue) -> AttributeValue {
    match value {
        storage::AttributeValue::S(s) => AttributeValue::S(s),
        storage::AttributeValue::N(n) => AttributeValue::N(n),
    }
}

fn from_attribute(name: &str, value: &AttributeValue) -> storage::Result<storage::AttributeValue> {
    match value {
        AttributeValue::S(s) => Ok(storage::AttributeValue::S(s.clone())),
        AttributeValue::N(n) => Ok(storage::AttributeValue::N(n.clone())),
        other => Err(RepositoryError::Serialization(format!(
            "unsupported attribute type for {name}: {other:?}"
        ))),
    }
}

// ============================================================================
// Query expressions
// ============================================================================

/// Placeholder bound to the partition key value.
pub const PK_VALUE: &str = ":pk";
/// Placeholder bound to the sort key operand.
pub const SK_VALUE: &str = ":sk";

/// Key condition expression for a partition query.
///
/// `#pk` and `#sk` must be bound to the key attribute names.
pub fn key_condition_expression(condition: &SortKeyCondition) -> &'static str {
    match condition {
        SortKeyCondition::Any => "#pk = :pk",
        SortKeyCondition::Equals(_) => "#pk = :pk AND #sk = :sk",
        SortKeyCondition::BeginsWith(_) => "#pk = :pk AND begins_with(#sk, :sk)",
    }
}

/// The sort key operand of a condition, if it has one.
pub fn sort_key_operand(condition: &SortKeyCondition) -> Option<&str> {
    match condition {
        SortKeyCondition::Any => None,
        SortKeyCondition::Equals(value) | SortKeyCondition::BeginsWith(value) => Some(value),
    }
}
