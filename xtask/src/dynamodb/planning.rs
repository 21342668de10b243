//! Pure functions for calculating deployment plans (Functional Core).

use super::config::{KeyRole, TableConfig};

/// Represents the current state of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub status: TableStatus,
    /// Primary key as `(attribute, role)` pairs.
    pub key_schema: Vec<(String, KeyRole)>,
    /// Names of the table's local secondary indexes.
    pub index_names: Vec<String>,
}

/// Table status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
    /// A status the table cannot serve requests in, e.g. `ARCHIVED` or
    /// `INACCESSIBLE_ENCRYPTION_CREDENTIALS`.
    Unusable(String),
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { config: TableConfig },
    /// Table exists with other keys or indexes; neither can be changed in place.
    KeySchemaMismatch {
        table_name: String,
        expected: Vec<(String, KeyRole)>,
        actual: Vec<(String, KeyRole)>,
        expected_indexes: Vec<String>,
        actual_indexes: Vec<String>,
    },
    /// Table exists but is in a status that cannot serve requests.
    TableUnusable { table_name: String, status: String },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what changes are needed to reach desired state.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    let Some(state) = current else {
        return DeployPlan::CreateTable {
            config: desired.clone(),
        };
    };

    if let TableStatus::Unusable(status) = &state.status {
        return DeployPlan::TableUnusable {
            table_name: desired.table_name.clone(),
            status: status.clone(),
        };
    }

    let expected = desired.key_schema();
    let mut actual = state.key_schema.clone();
    // DescribeTable does not promise hash-first order
    actual.sort_by_key(|(_, role)| *role != KeyRole::Hash);

    let expected_indexes = desired.index_names();
    let mut actual_indexes = state.index_names.clone();
    actual_indexes.sort();

    if actual == expected && actual_indexes == expected_indexes {
        DeployPlan::NoChanges {
            table_name: desired.table_name.clone(),
        }
    } else {
        DeployPlan::KeySchemaMismatch {
            table_name: desired.table_name.clone(),
            expected,
            actual,
            expected_indexes,
            actual_indexes,
        }
    }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

fn format_key_schema(keys: &[(String, KeyRole)]) -> String {
    keys.iter()
        .map(|(name, role)| format!("{} ({})", name, role.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_index_names(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => {
            let mut lines = vec![
                format!("+ Create table: {}", config.table_name),
                format!(
                    "  Partition key: {} ({})",
                    config.partition_key.name,
                    config.partition_key.attribute_type.as_str()
                ),
            ];
            if let Some(sort_key) = &config.sort_key {
                lines.push(format!(
                    "  Sort key: {} ({})",
                    sort_key.name,
                    sort_key.attribute_type.as_str()
                ));
            }
            for index in &config.local_indexes {
                lines.push(format!(
                    "  Local index: {} on {} ({})",
                    index.index_name,
                    index.sort_key.name,
                    index.sort_key.attribute_type.as_str()
                ));
            }
            lines.push("  Billing: PAY_PER_REQUEST".to_string());
            lines
        }
        DeployPlan::KeySchemaMismatch {
            table_name,
            expected,
            actual,
            expected_indexes,
            actual_indexes,
        } => {
            let mut lines = vec![
                format!("~ Table '{}' has an incompatible key schema", table_name),
                format!("  Expected: {}", format_key_schema(expected)),
                format!("  Actual:   {}", format_key_schema(actual)),
            ];
            if expected_indexes != actual_indexes {
                lines.push(format!(
                    "  Expected indexes: {}",
                    format_index_names(expected_indexes)
                ));
                lines.push(format!(
                    "  Actual indexes:   {}",
                    format_index_names(actual_indexes)
                ));
            }
            lines.push("  Destroy and redeploy the table to fix it".to_string());
            lines
        }
        DeployPlan::TableUnusable { table_name, status } => vec![
            format!("~ Table '{}' is {} and cannot serve requests", table_name, status),
            "  Restore or destroy the table before deploying".to_string(),
        ],
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}
