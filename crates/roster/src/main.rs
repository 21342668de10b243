mod cli;
mod commands;
mod config;
mod output;
mod storage;

use anyhow::Result;
use clap::Parser;
use roster_core::league::multitable::{PLAYER_TABLE_SCHEMA, TEAM_TABLE_SCHEMA};
use roster_core::league::{TableLayout, LEAGUE_TABLE_SCHEMA};
use roster_core::service::{LeagueService, MultiTableLeagueService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{cli::Cli, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster=info,roster_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env()?;
    if let Some(layout) = cli.layout {
        config = config.with_layout(layout.into());
    }
    if let Some(table_name) = cli.table_name {
        config = config.with_table_name(table_name);
    }
    if let Some(encoding) = cli.salary_encoding {
        config = config.with_salary_encoding(encoding.into());
    }

    tracing::debug!(
        layout = %config.layout,
        table = %config.table_name,
        encoding = %config.salary_encoding,
        "Loaded configuration"
    );

    let output = match config.layout {
        TableLayout::SingleTable => {
            let store = storage::open(&config, &config.table_name, LEAGUE_TABLE_SCHEMA).await?;
            let service = LeagueService::new(store, config.salary_encoding);
            commands::execute(&service, cli.command, cli.format).await?
        }
        TableLayout::MultiTable => {
            let teams = storage::open(&config, &config.team_table_name, TEAM_TABLE_SCHEMA).await?;
            let players =
                storage::open(&config, &config.player_table_name, PLAYER_TABLE_SCHEMA).await?;
            let service = MultiTableLeagueService::new(teams, players);
            commands::execute(&service, cli.command, cli.format).await?
        }
    };
    println!("{output}");

    Ok(())
}
