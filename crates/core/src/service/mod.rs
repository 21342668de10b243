//! Entity-level access to league tables.
//!
//! Two services turn team and player operations into puts, gets and queries
//! against injected [`ItemStore`](crate::storage::ItemStore)s:
//!
//! - [`LeagueService`]: one table, one partition per team.
//! - [`MultiTableLeagueService`]: a team table and a player table with a
//!   salary index.
//!
//! Both implement [`LeagueOperations`], so callers can run the same access
//! patterns against either layout. Neither keeps state besides its store
//! handles, so one instance can be shared across tasks.

mod multi_table;
mod single_table;

use async_trait::async_trait;
use thiserror::Error;

use crate::league::{self, LeagueError, Player, TableLayout, Team, TeamSummary};
use crate::storage::RepositoryError;

pub use multi_table::MultiTableLeagueService;
pub use single_table::LeagueService;

/// Errors returned by the league services.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    League(#[from] LeagueError),
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl ServiceError {
    fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            entity_type,
            id: id.into(),
        }
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Team and player access patterns, independent of the table layout.
#[async_trait]
pub trait LeagueOperations: Send + Sync {
    /// The layout this service reads and writes.
    fn layout(&self) -> TableLayout;

    /// Upserts a team. Wins must fit in 32 unsigned bits.
    async fn write_team(&self, team_name: &str, wins: i64) -> Result<Team>;

    /// Upserts a player. The salary must be non-negative.
    async fn write_player(&self, player_name: &str, salary: i64, team_name: &str)
        -> Result<Player>;

    /// Writes every team, then every player.
    async fn seed_league(&self, teams: &[Team], players: &[Player]) -> Result<()>;

    /// Point lookup of a team.
    async fn read_team(&self, team_name: &str) -> Result<Team>;

    /// Looks up one player of a team by name.
    async fn read_player(&self, team_name: &str, player_name: &str) -> Result<Player>;

    /// A team with its players, best paid first.
    async fn read_team_summary(&self, team_name: &str) -> Result<TeamSummary>;

    /// A team's players, in the order the layout stores them.
    async fn list_players_by_team(&self, team_name: &str) -> Result<Vec<Player>>;

    /// The team's best-paid player, if it has any players.
    async fn highest_paid_player(&self, team_name: &str) -> Result<Option<Player>>;
}

fn validate_wins(wins: i64) -> league::Result<u32> {
    u32::try_from(wins).map_err(|_| {
        LeagueError::InvalidArgument(format!(
            "wins must be a non-negative 32-bit value, got {wins}"
        ))
    })
}

fn require_name(what: &str, value: &str) -> league::Result<()> {
    if value.is_empty() {
        return Err(LeagueError::InvalidArgument(format!(
            "{what} cannot be empty"
        )));
    }
    Ok(())
}
