//! Table configuration types (Functional Core - pure data).

use roster_core::league::multitable::{PLAYER_TEAM_ATTR, SALARY_INDEX};
use roster_core::league::{PARTITION_KEY_ATTR, PLAYER_NAME_ATTR, SALARY_ATTR, SORT_KEY_ATTR};

/// Default table names, shared with the `roster` binary.
pub const DEFAULT_TABLE_NAME: &str = "league";
pub const DEFAULT_TEAM_TABLE_NAME: &str = "Teams";
pub const DEFAULT_PLAYER_TABLE_NAME: &str = "Players";

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    /// `None` for a table keyed by the partition key alone.
    pub sort_key: Option<KeyAttribute>,
    pub local_indexes: Vec<LocalIndexConfig>,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// A local secondary index, projecting all attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalIndexConfig {
    pub index_name: String,
    pub sort_key: KeyAttribute,
}

/// DynamoDB attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Number,
}

impl AttributeType {
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeType::String => "S",
            AttributeType::Number => "N",
        }
    }
}

/// Role of an attribute in the primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Hash,
    Range,
}

impl KeyRole {
    pub fn as_str(self) -> &'static str {
        match self {
            KeyRole::Hash => "HASH",
            KeyRole::Range => "RANGE",
        }
    }
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

impl KeyAttribute {
    fn new(name: &str, attribute_type: AttributeType) -> Self {
        Self {
            name: name.to_string(),
            attribute_type,
        }
    }
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// The primary key as `(attribute, role)` pairs, hash key first.
    pub fn key_schema(&self) -> Vec<(String, KeyRole)> {
        let mut keys = vec![(self.partition_key.name.clone(), KeyRole::Hash)];
        if let Some(sort_key) = &self.sort_key {
            keys.push((sort_key.name.clone(), KeyRole::Range));
        }
        keys
    }

    /// Every attribute used by the primary key or an index, each once.
    pub fn key_attributes(&self) -> Vec<&KeyAttribute> {
        let mut attributes = vec![&self.partition_key];
        let others = self
            .sort_key
            .iter()
            .chain(self.local_indexes.iter().map(|index| &index.sort_key));

        for attribute in others {
            if !attributes.iter().any(|a| a.name == attribute.name) {
                attributes.push(attribute);
            }
        }
        attributes
    }

    /// Names of the local secondary indexes, sorted.
    pub fn index_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .local_indexes
            .iter()
            .map(|index| index.index_name.clone())
            .collect();
        names.sort();
        names
    }
}

/// Returns the table configuration for the shared league table.
/// This is a pure function - no I/O.
pub fn league_table_config() -> TableConfig {
    TableConfig {
        table_name: DEFAULT_TABLE_NAME.to_string(),
        partition_key: KeyAttribute::new(PARTITION_KEY_ATTR, AttributeType::String),
        sort_key: Some(KeyAttribute::new(SORT_KEY_ATTR, AttributeType::String)),
        local_indexes: Vec::new(),
        billing_mode: BillingMode::PayPerRequest,
    }
}

/// Returns the team table of the multi-table layout.
pub fn team_table_config() -> TableConfig {
    TableConfig {
        table_name: DEFAULT_TEAM_TABLE_NAME.to_string(),
        partition_key: KeyAttribute::new(PARTITION_KEY_ATTR, AttributeType::String),
        sort_key: None,
        local_indexes: Vec::new(),
        billing_mode: BillingMode::PayPerRequest,
    }
}

/// Returns the player table of the multi-table layout, with its salary index.
pub fn player_table_config() -> TableConfig {
    TableConfig {
        table_name: DEFAULT_PLAYER_TABLE_NAME.to_string(),
        partition_key: KeyAttribute::new(PLAYER_TEAM_ATTR, AttributeType::String),
        sort_key: Some(KeyAttribute::new(PLAYER_NAME_ATTR, AttributeType::String)),
        local_indexes: vec![LocalIndexConfig {
            index_name: SALARY_INDEX.to_string(),
            sort_key: KeyAttribute::new(SALARY_ATTR, AttributeType::Number),
        }],
        billing_mode: BillingMode::PayPerRequest,
    }
}
