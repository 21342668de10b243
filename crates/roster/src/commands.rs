//! Command execution against a league service of either layout.

use anyhow::Result;
use roster_core::league::{seed_players, seed_teams, Player, Team};
use roster_core::service::LeagueOperations;
use serde::Serialize;

use crate::cli::{Commands, OutputFormat};
use crate::output::{format_output, pretty};

/// Results of the three access patterns run by `demo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoReport {
    pub team: Team,
    pub players: Vec<Player>,
    pub top_salary: Option<Player>,
}

/// Record counts written by `seed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub teams: usize,
    pub players: usize,
}

/// Runs a command and returns its rendered output.
pub async fn execute<L: LeagueOperations + ?Sized>(
    service: &L,
    command: Commands,
    format: OutputFormat,
) -> Result<String> {
    let output = match command {
        Commands::WriteTeam(args) => {
            let team = service.write_team(&args.team_name, args.wins).await?;
            format_output(&team, format, pretty::format_team)
        }
        Commands::WritePlayer(args) => {
            let player = service
                .write_player(&args.player_name, args.salary, &args.team)
                .await?;
            format_output(&player, format, pretty::format_player)
        }
        Commands::Team(args) => {
            let team = service.read_team(&args.team_name).await?;
            format_output(&team, format, pretty::format_team)
        }
        Commands::Player(args) => {
            let player = service.read_player(&args.team, &args.player_name).await?;
            format_output(&player, format, pretty::format_player)
        }
        Commands::Summary(args) => {
            let summary = service.read_team_summary(&args.team_name).await?;
            format_output(&summary, format, pretty::format_summary)
        }
        Commands::Players(args) => {
            let players = service.list_players_by_team(&args.team_name).await?;
            format_output(&players, format, |p| pretty::format_players(p))
        }
        Commands::TopSalary(args) => {
            let player = service.highest_paid_player(&args.team_name).await?;
            format_output(&player, format, pretty::format_top_salary)
        }
        Commands::Seed => {
            let teams = seed_teams();
            let players = seed_players();
            service.seed_league(&teams, &players).await?;
            let seeded = SeedReport {
                teams: teams.len(),
                players: players.len(),
            };
            format_output(&seeded, format, |s| {
                format!("Seeded {} teams and {} players", s.teams, s.players)
            })
        }
        Commands::Demo(args) => {
            let report = run_demo(service, &args.team).await?;
            format_output(&report, format, pretty::format_demo)
        }
    };

    Ok(output)
}

/// Seeds the league, then reads a team's wins, players and top salary.
pub async fn run_demo<L: LeagueOperations + ?Sized>(
    service: &L,
    team_name: &str,
) -> Result<DemoReport> {
    service.seed_league(&seed_teams(), &seed_players()).await?;

    let team = service.read_team(team_name).await?;
    let players = service.list_players_by_team(team_name).await?;
    let top_salary = service.highest_paid_player(team_name).await?;

    tracing::info!(
        team = %team.team_name,
        players = players.len(),
        layout = %service.layout(),
        "Demo complete"
    );

    Ok(DemoReport {
        team,
        players,
        top_salary,
    })
}

#[cfg(test)]
mod tests {
    use roster_core::league::multitable::{PLAYER_TABLE_SCHEMA, TEAM_TABLE_SCHEMA};
    use roster_core::league::SalaryEncoding;
    use roster_core::service::{LeagueService, MultiTableLeagueService, ServiceError};

    use super::*;
    use crate::cli::{DemoArgs, PlayerArgs, TeamArgs, WritePlayerArgs, WriteTeamArgs};
    use crate::storage::inmemory::InMemoryStore;

    fn service(encoding: SalaryEncoding) -> LeagueService<InMemoryStore> {
        LeagueService::new(InMemoryStore::new(), encoding)
    }

    fn multi_table_service() -> MultiTableLeagueService<InMemoryStore> {
        MultiTableLeagueService::new(
            InMemoryStore::with_schema(TEAM_TABLE_SCHEMA),
            InMemoryStore::with_schema(PLAYER_TABLE_SCHEMA),
        )
    }

    const PHILLIES_DEMO: &str = "The Phillies had 81 wins in 2019\n\
                                 The following players play for the Phillies:\n\
                                 Bryce Harper\n\
                                 Rhys Hoskins\n\
                                 Bryce Harper has the highest salary of $11,538,462";

    fn team_args(name: &str) -> TeamArgs {
        TeamArgs {
            team_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_demo_pretty_output() {
        let service = service(SalaryEncoding::Padded);
        let output = execute(
            &service,
            Commands::Demo(DemoArgs {
                team: "Phillies".to_string(),
            }),
            OutputFormat::Pretty,
        )
        .await
        .unwrap();

        assert_eq!(output, PHILLIES_DEMO);
    }

    #[tokio::test]
    async fn test_demo_pretty_output_with_two_tables() {
        let service = multi_table_service();
        let output = execute(
            &service,
            Commands::Demo(DemoArgs {
                team: "Phillies".to_string(),
            }),
            OutputFormat::Pretty,
        )
        .await
        .unwrap();

        assert_eq!(output, PHILLIES_DEMO);
    }

    #[tokio::test]
    async fn test_read_player_in_both_layouts() {
        let single = service(SalaryEncoding::Padded);
        let multi = multi_table_service();
        let services: [&dyn LeagueOperations; 2] = [&single, &multi];

        for service in services {
            execute(service, Commands::Seed, OutputFormat::Json)
                .await
                .unwrap();
            let output = execute(
                service,
                Commands::Player(PlayerArgs {
                    player_name: "Homer Bailey".to_string(),
                    team: "Dodgers".to_string(),
                }),
                OutputFormat::Json,
            )
            .await
            .unwrap();
            let value: serde_json::Value = serde_json::from_str(&output).unwrap();

            assert_eq!(value["salary"], 23_000_000, "layout {}", service.layout());
            assert_eq!(value["team"], "Dodgers");
        }
    }

    #[tokio::test]
    async fn test_demo_with_reversed_encoding() {
        let service = service(SalaryEncoding::Reversed);
        let report = run_demo(&service, "Dodgers").await.unwrap();

        assert_eq!(report.team, Team::new("Dodgers", 106));
        assert_eq!(report.players.len(), 2);
        assert_eq!(
            report.top_salary.map(|p| p.player_name),
            Some("Homer Bailey".to_string())
        );
    }

    #[tokio::test]
    async fn test_write_then_read_json() {
        let service = service(SalaryEncoding::Padded);

        execute(
            &service,
            Commands::WriteTeam(WriteTeamArgs {
                team_name: "Phillies".to_string(),
                wins: 81,
            }),
            OutputFormat::Json,
        )
        .await
        .unwrap();
        execute(
            &service,
            Commands::WritePlayer(WritePlayerArgs {
                player_name: "Rhys Hoskins".to_string(),
                salary: 57_500,
                team: "Phillies".to_string(),
            }),
            OutputFormat::Json,
        )
        .await
        .unwrap();

        let output = execute(&service, Commands::Summary(team_args("Phillies")), OutputFormat::Json)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["team"]["wins"], 81);
        assert_eq!(value["players"][0]["player_name"], "Rhys Hoskins");
    }

    #[tokio::test]
    async fn test_top_salary_for_team_without_players() {
        let service = service(SalaryEncoding::Padded);
        service.write_team("Expos", 0).await.unwrap();

        let output = execute(&service, Commands::TopSalary(team_args("Expos")), OutputFormat::Json)
            .await
            .unwrap();
        assert_eq!(output, "null");
    }

    #[tokio::test]
    async fn test_missing_team_is_an_error() {
        let service = service(SalaryEncoding::Padded);

        let error = execute(&service, Commands::Team(team_args("Expos")), OutputFormat::Pretty)
            .await
            .unwrap_err();

        assert_eq!(
            error.downcast_ref::<ServiceError>(),
            Some(&ServiceError::NotFound {
                entity_type: "Team",
                id: "Expos".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_seed_reports_counts() {
        let service = service(SalaryEncoding::Padded);
        let output = execute(&service, Commands::Seed, OutputFormat::Pretty)
            .await
            .unwrap();

        assert_eq!(output, "Seeded 3 teams and 6 players");
        assert_eq!(
            service.read_team("Yankees").await.unwrap(),
            Team::new("Yankees", 103)
        );
    }
}
