use async_trait::async_trait;

use crate::league::multitable::{
    player_from_player_table, player_table_key, player_table_record, players_by_name_query,
    players_by_salary_query, team_from_team_table, team_table_key, team_table_record,
};
use crate::league::{validate_salary, Player, TableLayout, Team, TeamSummary};
use crate::storage::{ItemQuery, ItemStore, Record};

use super::{require_name, validate_wins, LeagueOperations, Result, ServiceError};

/// Reads and writes teams and players kept in two tables.
///
/// Highest-paid lookups go through the player table's salary index, so they
/// read one record whatever the salaries look like.
#[derive(Debug, Clone)]
pub struct MultiTableLeagueService<S> {
    teams: S,
    players: S,
}

impl<S: ItemStore> MultiTableLeagueService<S> {
    /// Takes ownership of the opened team and player stores.
    pub fn new(teams: S, players: S) -> Self {
        Self { teams, players }
    }

    /// Releases the team and player store handles.
    pub fn into_stores(self) -> (S, S) {
        (self.teams, self.players)
    }

    async fn put_team(&self, team: &Team) -> Result<()> {
        require_name("team name", &team.team_name)?;
        let key = team_table_key(&team.team_name);
        tracing::debug!(team = %team.team_name, wins = team.wins, "Writing team");

        self.teams.put(&key, team_table_record(team)).await?;
        Ok(())
    }

    async fn put_player(&self, player: &Player) -> Result<()> {
        require_name("player name", &player.player_name)?;
        require_name("team name", &player.team)?;
        let key = player_table_key(&player.team, &player.player_name);
        tracing::debug!(
            player = %player.player_name,
            team = %player.team,
            "Writing player"
        );

        self.players.put(&key, player_table_record(player)).await?;
        Ok(())
    }

    async fn query_players(&self, query: &ItemQuery) -> Result<Vec<Player>> {
        let records = self.players.query(query).await?;
        decode_players(&records)
    }
}

#[async_trait]
impl<S: ItemStore> LeagueOperations for MultiTableLeagueService<S> {
    fn layout(&self) -> TableLayout {
        TableLayout::MultiTable
    }

    async fn write_team(&self, team_name: &str, wins: i64) -> Result<Team> {
        let team = Team::new(team_name, validate_wins(wins)?);
        self.put_team(&team).await?;
        Ok(team)
    }

    async fn write_player(
        &self,
        player_name: &str,
        salary: i64,
        team_name: &str,
    ) -> Result<Player> {
        let player = Player::new(player_name, validate_salary(salary)?, team_name);
        self.put_player(&player).await?;
        Ok(player)
    }

    async fn seed_league(&self, teams: &[Team], players: &[Player]) -> Result<()> {
        for team in teams {
            self.put_team(team).await?;
        }
        for player in players {
            self.put_player(player).await?;
        }

        tracing::info!(
            teams = teams.len(),
            players = players.len(),
            "Seeded league tables"
        );
        Ok(())
    }

    async fn read_team(&self, team_name: &str) -> Result<Team> {
        tracing::debug!(team = %team_name, "Reading team");

        match self.teams.get(&team_table_key(team_name)).await? {
            Some(record) => Ok(team_from_team_table(&record)?),
            None => Err(ServiceError::not_found("Team", team_name)),
        }
    }

    async fn read_player(&self, team_name: &str, player_name: &str) -> Result<Player> {
        tracing::debug!(team = %team_name, player = %player_name, "Reading player");
        let key = player_table_key(team_name, player_name);

        match self.players.get(&key).await? {
            Some(record) => Ok(player_from_player_table(&record)?),
            None => Err(ServiceError::not_found(
                "Player",
                format!("{team_name}/{player_name}"),
            )),
        }
    }

    /// Reads the team, then its players through the salary index.
    async fn read_team_summary(&self, team_name: &str) -> Result<TeamSummary> {
        let team = self.read_team(team_name).await?;
        let players = self
            .query_players(&players_by_salary_query(team_name))
            .await?;

        Ok(TeamSummary { team, players })
    }

    /// Lists a team's players by name.
    async fn list_players_by_team(&self, team_name: &str) -> Result<Vec<Player>> {
        tracing::debug!(team = %team_name, "Listing players");
        self.query_players(&players_by_name_query(team_name)).await
    }

    async fn highest_paid_player(&self, team_name: &str) -> Result<Option<Player>> {
        let players = self
            .query_players(&players_by_salary_query(team_name).limit(1))
            .await?;
        Ok(players.into_iter().next())
    }
}

fn decode_players(records: &[Record]) -> Result<Vec<Player>> {
    records
        .iter()
        .map(|record| player_from_player_table(record).map_err(ServiceError::from))
        .collect()
}
