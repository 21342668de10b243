use async_trait::async_trait;

use crate::league::{
    assemble, encode_team_key, player_from_record, player_sort_key_prefix, record_from_player,
    record_from_team, team_from_record, validate_salary, Player, SalaryEncoding, TableLayout,
    Team, TeamSummary,
};
use crate::storage::{ItemQuery, ItemStore};

use super::{require_name, validate_wins, LeagueOperations, Result, ServiceError};

/// Reads and writes teams and players in a single table.
#[derive(Debug, Clone)]
pub struct LeagueService<S> {
    store: S,
    encoding: SalaryEncoding,
}

impl<S: ItemStore> LeagueService<S> {
    /// Takes ownership of an opened store.
    pub fn new(store: S, encoding: SalaryEncoding) -> Self {
        Self { store, encoding }
    }

    /// The salary encoding used for player sort keys.
    pub fn encoding(&self) -> SalaryEncoding {
        self.encoding
    }

    /// Releases the store handle.
    pub fn into_store(self) -> S {
        self.store
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    /// Upserts a team record.
    pub async fn write_team(&self, team_name: &str, wins: i64) -> Result<Team> {
        let wins = validate_wins(wins)?;

        let team = Team::new(team_name, wins);
        self.put_team(&team).await?;
        Ok(team)
    }

    /// Upserts a player record in their team's partition.
    pub async fn write_player(
        &self,
        player_name: &str,
        salary: i64,
        team_name: &str,
    ) -> Result<Player> {
        let salary = validate_salary(salary)?;

        let player = Player::new(player_name, salary, team_name);
        self.put_player(&player).await?;
        Ok(player)
    }

    /// Writes every team, then every player.
    pub async fn seed_league(&self, teams: &[Team], players: &[Player]) -> Result<()> {
        for team in teams {
            self.put_team(team).await?;
        }
        for player in players {
            self.put_player(player).await?;
        }

        tracing::info!(
            teams = teams.len(),
            players = players.len(),
            "Seeded league"
        );
        Ok(())
    }

    async fn put_team(&self, team: &Team) -> Result<()> {
        require_name("team name", &team.team_name)?;
        let key = encode_team_key(&team.team_name);
        tracing::debug!(team = %team.team_name, wins = team.wins, "Writing team");

        self.store.put(&key, record_from_team(team)).await?;
        Ok(())
    }

    async fn put_player(&self, player: &Player) -> Result<()> {
        require_name("player name", &player.player_name)?;
        require_name("team name", &player.team)?;
        let key = self
            .encoding
            .player_key_unsigned(&player.team, player.salary);
        tracing::debug!(
            player = %player.player_name,
            team = %player.team,
            sort_key = %key.sort_key,
            "Writing player"
        );

        self.store
            .put(&key, record_from_player(player, self.encoding))
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// Point lookup of a team record.
    pub async fn read_team(&self, team_name: &str) -> Result<Team> {
        let key = encode_team_key(team_name);
        tracing::debug!(team = %team_name, "Reading team");

        match self.store.get(&key).await? {
            Some(record) => Ok(team_from_record(&record)?),
            None => Err(ServiceError::not_found("Team", team_name)),
        }
    }

    /// Finds a player by name among the team's players.
    ///
    /// The player key holds the salary, not the name, so this reads the
    /// team's player range.
    pub async fn read_player(&self, team_name: &str, player_name: &str) -> Result<Player> {
        self.list_players_by_team(team_name)
            .await?
            .into_iter()
            .find(|player| player.player_name == player_name)
            .ok_or_else(|| {
                ServiceError::not_found("Player", format!("{team_name}/{player_name}"))
            })
    }

    /// Reads the whole partition of a team, team record first.
    pub async fn read_team_summary(&self, team_name: &str) -> Result<TeamSummary> {
        tracing::debug!(team = %team_name, "Reading team summary");
        let records = self
            .store
            .query(&ItemQuery::partition(team_name).descending())
            .await?;

        if records.is_empty() {
            return Err(ServiceError::not_found("Team", team_name));
        }

        Ok(assemble(team_name, &records)?)
    }

    /// Lists a team's players in descending sort-key order.
    pub async fn list_players_by_team(&self, team_name: &str) -> Result<Vec<Player>> {
        tracing::debug!(team = %team_name, "Listing players");
        let records = self.store.query(&players_query(team_name)).await?;

        records
            .iter()
            .map(|record| player_from_record(record).map_err(ServiceError::from))
            .collect()
    }

    /// Returns the team's best-paid player, if it has any players.
    ///
    /// With an order-preserving encoding this reads a single record;
    /// otherwise every player in the partition is read.
    pub async fn highest_paid_player(&self, team_name: &str) -> Result<Option<Player>> {
        if self.encoding.preserves_order() {
            let records = self
                .store
                .query(&players_query(team_name).limit(1))
                .await?;
            return records
                .first()
                .map(player_from_record)
                .transpose()
                .map_err(ServiceError::from);
        }

        let players = self.list_players_by_team(team_name).await?;
        Ok(players.into_iter().max_by_key(|player| player.salary))
    }
}

#[async_trait]
impl<S: ItemStore> LeagueOperations for LeagueService<S> {
    fn layout(&self) -> TableLayout {
        TableLayout::SingleTable
    }

    async fn write_team(&self, team_name: &str, wins: i64) -> Result<Team> {
        LeagueService::write_team(self, team_name, wins).await
    }

    async fn write_player(
        &self,
        player_name: &str,
        salary: i64,
        team_name: &str,
    ) -> Result<Player> {
        LeagueService::write_player(self, player_name, salary, team_name).await
    }

    async fn seed_league(&self, teams: &[Team], players: &[Player]) -> Result<()> {
        LeagueService::seed_league(self, teams, players).await
    }

    async fn read_team(&self, team_name: &str) -> Result<Team> {
        LeagueService::read_team(self, team_name).await
    }

    async fn read_player(&self, team_name: &str, player_name: &str) -> Result<Player> {
        LeagueService::read_player(self, team_name, player_name).await
    }

    async fn read_team_summary(&self, team_name: &str) -> Result<TeamSummary> {
        LeagueService::read_team_summary(self, team_name).await
    }

    async fn list_players_by_team(&self, team_name: &str) -> Result<Vec<Player>> {
        LeagueService::list_players_by_team(self, team_name).await
    }

    async fn highest_paid_player(&self, team_name: &str) -> Result<Option<Player>> {
        LeagueService::highest_paid_player(self, team_name).await
    }
}

fn players_query(team_name: &str) -> ItemQuery {
    ItemQuery::partition(team_name)
        .begins_with(player_sort_key_prefix())
        .descending()
}
