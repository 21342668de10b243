//! Key generation for the single-table league layout.
//!
//! Teams and players share one partition per team name. The sort key tells
//! them apart:
//!
//! | Entity | PK (`TeamName`) | SK |
//! |--------|-----------------|----|
//! | Team   | `<team_name>`   | `TEAM#` |
//! | Player | `<team_name>`   | `PLAYER#<salary key>` |
//!
//! `TEAM#` sorts after every `PLAYER#` key (`'T' > 'P'`), so a descending
//! partition query returns the team record first.
//!
//! All functions are pure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::storage::{ItemKey, TableSchema};

use super::error::{LeagueError, Result};
use super::types::RecordKind;

// ============================================================================
// Attribute names and tags
// ============================================================================

/// Partition key attribute.
pub const PARTITION_KEY_ATTR: &str = "TeamName";
/// Sort key attribute.
pub const SORT_KEY_ATTR: &str = "SK";

/// Key layout of the shared league table.
pub const LEAGUE_TABLE_SCHEMA: TableSchema = TableSchema {
    partition_key: PARTITION_KEY_ATTR,
    sort_key: Some(SORT_KEY_ATTR),
    indexes: &[],
};

pub const TEAM_SORT_KEY: &str = "TEAM#";
pub const PLAYER_SORT_KEY_PREFIX: &str = "PLAYER#";

/// Width of a zero-padded salary; `u64::MAX` has 20 digits.
const PADDED_SALARY_WIDTH: usize = 20;

// ============================================================================
// Salary encoding
// ============================================================================

/// How a salary is rendered into the suffix of a player sort key.
///
/// A table must be written under one encoding. The same player written under
/// both gets two sort keys, so partition reads list that player twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryEncoding {
    /// Fixed-width zero-padded decimal. Lexicographic order equals numeric
    /// order for every salary.
    #[default]
    Padded,
    /// Decimal digits in reverse. Only orders salaries of equal digit count
    /// correctly; kept for tables written with this layout.
    Reversed,
}

impl SalaryEncoding {
    /// Encodes a salary, rejecting negative values.
    pub fn encode(self, salary: i64) -> Result<String> {
        let salary = validate_salary(salary)?;
        Ok(self.encode_unsigned(salary))
    }

    /// Encodes a salary that is already known to be non-negative.
    pub fn encode_unsigned(self, salary: u64) -> String {
        match self {
            SalaryEncoding::Padded => format!("{salary:0width$}", width = PADDED_SALARY_WIDTH),
            SalaryEncoding::Reversed => salary.to_string().chars().rev().collect(),
        }
    }

    /// Builds the key of a player record under this encoding.
    pub fn player_key(self, team_name: &str, salary: i64) -> Result<ItemKey> {
        Ok(ItemKey::new(
            team_name,
            format!("{PLAYER_SORT_KEY_PREFIX}{}", self.encode(salary)?),
        ))
    }

    /// Builds a player key from an unsigned salary.
    pub fn player_key_unsigned(self, team_name: &str, salary: u64) -> ItemKey {
        ItemKey::new(
            team_name,
            format!("{PLAYER_SORT_KEY_PREFIX}{}", self.encode_unsigned(salary)),
        )
    }

    /// Returns true if sort key order matches salary order for all salaries.
    pub fn preserves_order(self) -> bool {
        matches!(self, SalaryEncoding::Padded)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SalaryEncoding::Padded => "padded",
            SalaryEncoding::Reversed => "reversed",
        }
    }
}

impl fmt::Display for SalaryEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SalaryEncoding {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "padded" => Ok(SalaryEncoding::Padded),
            "reversed" => Ok(SalaryEncoding::Reversed),
            _ => Err(LeagueError::InvalidArgument(format!(
                "unknown salary encoding: {s} (expected 'padded' or 'reversed')"
            ))),
        }
    }
}

// ============================================================================
// Keys
// ============================================================================

/// Generate the key of a Team record.
///
/// Pattern: `<team_name>` / `TEAM#`
pub fn encode_team_key(team_name: &str) -> ItemKey {
    ItemKey::new(team_name, TEAM_SORT_KEY)
}

/// Generate the key of a Player record with the digit-reversed salary.
///
/// Pattern: `<team_name>` / `PLAYER#<reversed salary>`
///
/// Fails with `InvalidArgument` for a negative salary.
pub fn encode_player_key(team_name: &str, salary: i64) -> Result<ItemKey> {
    SalaryEncoding::Reversed.player_key(team_name, salary)
}

/// Render `n` in base 10 and reverse the characters.
pub fn reverse_digit_string(n: i64) -> Result<String> {
    SalaryEncoding::Reversed.encode(n)
}

/// The sort key prefix shared by all player records.
pub fn player_sort_key_prefix() -> &'static str {
    PLAYER_SORT_KEY_PREFIX
}

/// Determine which entity kind a sort key belongs to.
pub fn classify(sort_key: &str) -> Result<RecordKind> {
    if sort_key == TEAM_SORT_KEY {
        Ok(RecordKind::Team)
    } else if sort_key.starts_with(PLAYER_SORT_KEY_PREFIX) {
        Ok(RecordKind::Player)
    } else {
        Err(LeagueError::UnknownRecordKind(sort_key.to_string()))
    }
}

/// Accept a salary only if it is non-negative.
pub fn validate_salary(salary: i64) -> Result<u64> {
    u64::try_from(salary).map_err(|_| {
        LeagueError::InvalidArgument(format!("salary must be non-negative, got {salary}"))
    })
}
