//! Keys and records for the two-table league layout.
//!
//! Teams and players live in separate tables:
//!
//! | Table   | Hash key                  | Range key    | Attributes       |
//! |---------|---------------------------|--------------|------------------|
//! | Teams   | `TeamName` = `team_<name>` | none         | `Wins`           |
//! | Players | `Team` = `<team_name>`    | `PlayerName` | `Salary` (N)     |
//!
//! The player table carries a local secondary index, `TeamSalary`, that keeps
//! the `Team` partition and sorts it by `Salary`. Salary order comes from the
//! number type, so no salary encoding is involved.
//!
//! All functions are pure.

use crate::storage::{AttributeValue, ItemKey, ItemQuery, LocalIndex, Record, TableSchema};

use super::error::{LeagueError, Result};
use super::keys::PARTITION_KEY_ATTR;
use super::projections::{get_number, get_string, PLAYER_NAME_ATTR, SALARY_ATTR, WINS_ATTR};
use super::types::{Player, Team};

// ============================================================================
// Attribute names and schemas
// ============================================================================

/// Prefix of every team table key.
pub const TEAM_KEY_PREFIX: &str = "team_";
/// Hash key of the player table.
pub const PLAYER_TEAM_ATTR: &str = "Team";
/// Local secondary index over the player table, sorted by salary.
pub const SALARY_INDEX: &str = "TeamSalary";

/// Key layout of the team table.
pub const TEAM_TABLE_SCHEMA: TableSchema = TableSchema {
    partition_key: PARTITION_KEY_ATTR,
    sort_key: None,
    indexes: &[],
};

/// Key layout of the player table.
pub const PLAYER_TABLE_SCHEMA: TableSchema = TableSchema {
    partition_key: PLAYER_TEAM_ATTR,
    sort_key: Some(PLAYER_NAME_ATTR),
    indexes: &[LocalIndex {
        name: SALARY_INDEX,
        sort_key: SALARY_ATTR,
    }],
};

// ============================================================================
// Keys
// ============================================================================

/// Key of a team in the team table.
///
/// Pattern: `team_<team_name>`
pub fn team_table_key(team_name: &str) -> ItemKey {
    ItemKey::partition_only(format!("{TEAM_KEY_PREFIX}{team_name}"))
}

/// Key of a player in the player table.
///
/// Pattern: `<team_name>` / `<player_name>`
pub fn player_table_key(team_name: &str, player_name: &str) -> ItemKey {
    ItemKey::new(team_name, player_name)
}

/// Query for a team's players ordered by name.
pub fn players_by_name_query(team_name: &str) -> ItemQuery {
    ItemQuery::partition(team_name)
}

/// Query for a team's players from highest to lowest salary.
pub fn players_by_salary_query(team_name: &str) -> ItemQuery {
    ItemQuery::partition(team_name)
        .index(SALARY_INDEX)
        .descending()
}

// ============================================================================
// Records
// ============================================================================

/// Convert a Team to a team table record.
pub fn team_table_record(team: &Team) -> Record {
    let key = team_table_key(&team.team_name);
    let mut record = Record::new();

    record.insert(
        PARTITION_KEY_ATTR.to_string(),
        AttributeValue::S(key.partition_key),
    );
    record.insert(WINS_ATTR.to_string(), AttributeValue::number(team.wins));

    record
}

/// Convert a team table record to a Team, removing the key prefix.
pub fn team_from_team_table(record: &Record) -> Result<Team> {
    let key = get_string(record, PARTITION_KEY_ATTR)?;
    let team_name = key
        .strip_prefix(TEAM_KEY_PREFIX)
        .ok_or(LeagueError::MissingField(PARTITION_KEY_ATTR))?;

    Ok(Team {
        team_name: team_name.to_string(),
        wins: get_number(record, WINS_ATTR)?,
    })
}

/// Convert a Player to a player table record.
pub fn player_table_record(player: &Player) -> Record {
    let mut record = Record::new();

    record.insert(
        PLAYER_TEAM_ATTR.to_string(),
        AttributeValue::S(player.team.clone()),
    );
    record.insert(
        PLAYER_NAME_ATTR.to_string(),
        AttributeValue::S(player.player_name.clone()),
    );
    record.insert(SALARY_ATTR.to_string(), AttributeValue::number(player.salary));

    record
}

/// Convert a player table record to a Player.
pub fn player_from_player_table(record: &Record) -> Result<Player> {
    Ok(Player {
        player_name: get_string(record, PLAYER_NAME_ATTR)?,
        team: get_string(record, PLAYER_TEAM_ATTR)?,
        salary: get_number(record, SALARY_ATTR)?,
    })
}
