//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use roster_core::league::{SalaryEncoding, TableLayout};

/// Teams and players stored in DynamoDB, in one table or in two.
#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Which tables hold the league. Overrides `ROSTER_TABLE_LAYOUT`.
    #[arg(long, global = true, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Table holding the league. Overrides `ROSTER_TABLE_NAME`.
    #[arg(long, global = true)]
    pub table_name: Option<String>,

    /// Salary encoding for player sort keys. Overrides `ROSTER_SALARY_ENCODING`.
    #[arg(long, global = true, value_enum)]
    pub salary_encoding: Option<EncodingArg>,

    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Salary encoding argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncodingArg {
    /// Zero-padded, fixed width.
    Padded,
    /// Digits reversed.
    Reversed,
}

impl From<EncodingArg> for SalaryEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Padded => SalaryEncoding::Padded,
            EncodingArg::Reversed => SalaryEncoding::Reversed,
        }
    }
}

/// Table layout argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// One table with a partition per team.
    SingleTable,
    /// A team table and a player table with a salary index.
    MultiTable,
}

impl From<LayoutArg> for TableLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::SingleTable => TableLayout::SingleTable,
            LayoutArg::MultiTable => TableLayout::MultiTable,
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create or replace a team.
    WriteTeam(WriteTeamArgs),
    /// Create or replace a player.
    WritePlayer(WritePlayerArgs),
    /// Show a team's wins.
    Team(TeamArgs),
    /// Show one player of a team.
    Player(PlayerArgs),
    /// Show a team together with its players.
    Summary(TeamArgs),
    /// List a team's players.
    Players(TeamArgs),
    /// Show a team's highest-paid player.
    TopSalary(TeamArgs),
    /// Write the 2019 league into the table.
    Seed,
    /// Seed the league and run the three access patterns.
    Demo(DemoArgs),
}

#[derive(Debug, Args)]
pub struct WriteTeamArgs {
    /// Team name.
    pub team_name: String,

    /// Wins in the season.
    #[arg(long, allow_negative_numbers = true)]
    pub wins: i64,
}

#[derive(Debug, Args)]
pub struct WritePlayerArgs {
    /// Player name.
    pub player_name: String,

    /// Salary in dollars.
    #[arg(long, allow_negative_numbers = true)]
    pub salary: i64,

    /// Team the player belongs to.
    #[arg(long)]
    pub team: String,
}

#[derive(Debug, Args)]
pub struct TeamArgs {
    /// Team name.
    pub team_name: String,
}

#[derive(Debug, Args)]
pub struct PlayerArgs {
    /// Player name.
    pub player_name: String,

    /// Team the player belongs to.
    #[arg(long)]
    pub team: String,
}

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Team the access patterns are run against.
    #[arg(long, default_value = "Phillies")]
    pub team: String,
}
