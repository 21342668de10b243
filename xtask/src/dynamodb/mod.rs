//! DynamoDB infrastructure management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use dialoguer::Confirm;

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy the league tables.
    Deploy(DeployCommand),
}

/// Which tables to manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LayoutArg {
    /// The shared league table.
    SingleTable,
    /// The team table and the player table with its salary index.
    MultiTable,
}

/// Deploy or destroy the league tables.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy the league DynamoDB tables.

By default, this command creates the table teams and players share, keyed
by TeamName (partition) and SK (sort). With --layout multi-table it creates
a team table keyed by TeamName and a player table keyed by Team (partition)
and PlayerName (sort), with a TeamSalary local index on Salary. An existing
table with the same keys and indexes is left alone; one with different keys
is reported and never modified.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL     - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION           - AWS region (defaults to us-east-1)
  AWS_PROFILE          - AWS profile to use for credentials
  ROSTER_TABLE_LAYOUT  - single-table or multi-table (defaults to single-table)
  ROSTER_TABLE_NAME    - Shared table name (defaults to league)
  ROSTER_TEAM_TABLE    - Team table name (defaults to Teams)
  ROSTER_PLAYER_TABLE  - Player table name (defaults to Players)")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the tables instead of creating them.
    #[arg(long)]
    pub destroy: bool,

    /// Which tables to manage.
    #[arg(long, value_enum, env = "ROSTER_TABLE_LAYOUT", default_value = "single-table")]
    pub layout: LayoutArg,

    /// Shared table name (single-table layout).
    #[arg(long, env = "ROSTER_TABLE_NAME", default_value = config::DEFAULT_TABLE_NAME)]
    pub table_name: String,

    /// Team table name (multi-table layout).
    #[arg(long, env = "ROSTER_TEAM_TABLE", default_value = config::DEFAULT_TEAM_TABLE_NAME)]
    pub team_table: String,

    /// Player table name (multi-table layout).
    #[arg(long, env = "ROSTER_PLAYER_TABLE", default_value = config::DEFAULT_PLAYER_TABLE_NAME)]
    pub player_table: String,
}

impl DeployCommand {
    /// The tables of the selected layout.
    pub fn table_configs(&self) -> Vec<config::TableConfig> {
        match self.layout {
            LayoutArg::SingleTable => {
                vec![config::league_table_config().with_table_name(&self.table_name)]
            }
            LayoutArg::MultiTable => vec![
                config::team_table_config().with_table_name(&self.team_table),
                config::player_table_config().with_table_name(&self.player_table),
            ],
        }
    }
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await;

    let mut current_states = Vec::new();
    for table_config in cmd.table_configs() {
        let state = client::get_table_state(&dynamo_client, &table_config.table_name).await?;
        if global.is_verbose() {
            aprintln!(
                "{} {}: {:?}",
                p_b("Current state:"),
                table_config.table_name,
                state
            );
        }
        current_states.push((table_config, state));
    }
    if global.is_verbose() {
        aprintln!();
    }

    if cmd.destroy {
        // Destroy flow
        let plans: Vec<_> = current_states
            .iter()
            .map(|(table_config, state)| {
                planning::calculate_destroy_plan(state.as_ref(), &table_config.table_name)
            })
            .collect();

        if !global.is_silent() {
            aprintln!("{}", p_y("Destroy Plan:"));
            for line in plans.iter().flat_map(planning::format_destroy_plan) {
                aprintln!("  {}", p_r(&line));
            }
            aprintln!();
        }

        if plans
            .iter()
            .all(|plan| matches!(plan, planning::DestroyPlan::AlreadyGone { .. }))
        {
            if !global.is_silent() {
                aprintln!("{}", p_g("Nothing to destroy."));
            }
            return Ok(());
        }

        confirm(
            &cmd,
            "Are you sure you want to delete these tables? ALL DATA WILL BE LOST",
            false,
        )?;

        if !global.is_silent() {
            aprintln!("{}", p_b("Deleting tables..."));
        }

        for plan in &plans {
            deploy::execute_destroy_plan(&dynamo_client, plan).await?;
        }

        if !global.is_silent() {
            aprintln!("{}", p_g("Tables destroyed successfully."));
        }
    } else {
        // Deploy flow
        let plans: Vec<_> = current_states
            .iter()
            .map(|(table_config, state)| {
                planning::calculate_deploy_plan(state.as_ref(), table_config)
            })
            .collect();

        if !global.is_silent() {
            aprintln!("{}", p_c("Deploy Plan:"));
            for line in plans.iter().flat_map(planning::format_deploy_plan) {
                if line.starts_with('+') {
                    aprintln!("  {}", p_g(&line));
                } else if line.starts_with('~') {
                    aprintln!("  {}", p_y(&line));
                } else {
                    aprintln!("  {}", line);
                }
            }
            aprintln!();
        }

        // Refuse the whole deploy before touching any table
        for plan in &plans {
            match plan {
                planning::DeployPlan::KeySchemaMismatch { table_name, .. } => {
                    return Err(DynamodbError::KeySchemaMismatch {
                        table_name: table_name.clone(),
                    });
                }
                planning::DeployPlan::TableUnusable { table_name, status } => {
                    return Err(DynamodbError::TableUnusable {
                        table_name: table_name.clone(),
                        status: status.clone(),
                    });
                }
                planning::DeployPlan::CreateTable { .. }
                | planning::DeployPlan::NoChanges { .. } => {}
            }
        }

        if plans
            .iter()
            .all(|plan| matches!(plan, planning::DeployPlan::NoChanges { .. }))
        {
            if !global.is_silent() {
                aprintln!("{}", p_g("Infrastructure is up to date."));
            }
            return Ok(());
        }

        confirm(&cmd, "Apply these changes?", true)?;

        if !global.is_silent() {
            aprintln!("{}", p_b("Applying changes..."));
        }

        for plan in &plans {
            deploy::execute_deploy_plan(&dynamo_client, plan).await?;
        }

        if !global.is_silent() {
            aprintln!("{}", p_g("Infrastructure deployed successfully."));
        }
    }

    Ok(())
}

fn confirm(cmd: &DeployCommand, prompt: &str, default: bool) -> Result<()> {
    if cmd.force {
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

    if confirmed {
        Ok(())
    } else {
        Err(DynamodbError::UserCancelled)
    }
}
