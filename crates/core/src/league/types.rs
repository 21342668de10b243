use serde::{Deserialize, Serialize};

/// A team and its season win count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_name: String,
    pub wins: u32,
}

impl Team {
    pub fn new(team_name: impl Into<String>, wins: u32) -> Self {
        Self {
            team_name: team_name.into(),
            wins,
        }
    }
}

/// A player, the team they play for, and their salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_name: String,
    pub salary: u64,
    pub team: String,
}

impl Player {
    pub fn new(player_name: impl Into<String>, salary: u64, team: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            salary,
            team: team.into(),
        }
    }
}

/// The entity kind a sort key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Team,
    Player,
}

/// A decoded record from a league partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeagueRecord {
    Team(Team),
    Player(Player),
}

impl LeagueRecord {
    /// Returns the kind of this record.
    pub fn kind(&self) -> RecordKind {
        match self {
            LeagueRecord::Team(_) => RecordKind::Team,
            LeagueRecord::Player(_) => RecordKind::Player,
        }
    }

    /// Returns the partition (team name) this record lives in.
    pub fn partition_key(&self) -> &str {
        match self {
            LeagueRecord::Team(team) => &team.team_name,
            LeagueRecord::Player(player) => &player.team,
        }
    }
}

/// A team together with its players, as read from one partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team: Team,
    /// Players in the order the partition returned them.
    pub players: Vec<Player>,
}
