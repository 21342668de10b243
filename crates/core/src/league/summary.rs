//! Assembly of a team summary from the records of one partition.

use crate::storage::Record;

use super::error::{LeagueError, Result};
use super::projections::decode_record;
use super::types::{LeagueRecord, Team, TeamSummary};

/// Split a partition's records into its team and players.
///
/// Exactly one team record is required. Players keep the order they were
/// supplied in; the caller chooses that order through its query.
pub fn assemble(partition_key: &str, records: &[Record]) -> Result<TeamSummary> {
    let mut team: Option<Team> = None;
    let mut players = Vec::new();

    for record in records {
        let decoded = decode_record(record)?;

        if decoded.partition_key() != partition_key {
            return Err(malformed(
                partition_key,
                format!("record belongs to partition {}", decoded.partition_key()),
            ));
        }

        match decoded {
            LeagueRecord::Team(t) => {
                if team.is_some() {
                    return Err(malformed(partition_key, "more than one team record"));
                }
                team = Some(t);
            }
            LeagueRecord::Player(p) => players.push(p),
        }
    }

    let team = team.ok_or_else(|| malformed(partition_key, "no team record"))?;

    Ok(TeamSummary { team, players })
}

fn malformed(partition_key: &str, reason: impl Into<String>) -> LeagueError {
    LeagueError::MalformedPartition {
        partition_key: partition_key.to_string(),
        reason: reason.into(),
    }
}
