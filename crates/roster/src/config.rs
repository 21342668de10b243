use std::env;

use roster_core::league::{LeagueError, SalaryEncoding, TableLayout};

const DEFAULT_TABLE_NAME: &str = "league";
const DEFAULT_TEAM_TABLE_NAME: &str = "Teams";
const DEFAULT_PLAYER_TABLE_NAME: &str = "Players";
const DEFAULT_REGION: &str = "us-east-1";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Which tables hold the league (default: single-table)
    pub layout: TableLayout,
    /// Table holding teams and players (default: "league")
    pub table_name: String,
    /// Team table of the multi-table layout (default: "Teams")
    pub team_table_name: String,
    /// Player table of the multi-table layout (default: "Players")
    pub player_table_name: String,
    /// Salary encoding for player sort keys (default: padded)
    pub salary_encoding: SalaryEncoding,
    /// Custom DynamoDB endpoint, e.g. DynamoDB Local.
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub endpoint_url: Option<String>,
    /// AWS region (default: "us-east-1")
    #[allow(dead_code)]
    pub region: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ROSTER_TABLE_LAYOUT` - `single-table` or `multi-table` (default: single-table)
    /// - `ROSTER_TABLE_NAME` - Table name (default: "league")
    /// - `ROSTER_TEAM_TABLE` - Team table name (default: "Teams")
    /// - `ROSTER_PLAYER_TABLE` - Player table name (default: "Players")
    /// - `ROSTER_SALARY_ENCODING` - `padded` or `reversed` (default: padded)
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (default: none)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    pub fn from_env() -> Result<Self, LeagueError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Unset or empty values take their defaults. A layout or salary encoding
    /// that does not parse is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LeagueError> {
        let value = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let name_or = |name: &str, default: &str| value(name).unwrap_or_else(|| default.to_string());

        let layout = match value("ROSTER_TABLE_LAYOUT") {
            Some(layout) => layout.parse()?,
            None => TableLayout::default(),
        };
        let salary_encoding = match value("ROSTER_SALARY_ENCODING") {
            Some(encoding) => encoding.parse()?,
            None => SalaryEncoding::default(),
        };

        Ok(Self {
            layout,
            table_name: name_or("ROSTER_TABLE_NAME", DEFAULT_TABLE_NAME),
            team_table_name: name_or("ROSTER_TEAM_TABLE", DEFAULT_TEAM_TABLE_NAME),
            player_table_name: name_or("ROSTER_PLAYER_TABLE", DEFAULT_PLAYER_TABLE_NAME),
            salary_encoding,
            endpoint_url: value("AWS_ENDPOINT_URL"),
            region: name_or("AWS_REGION", DEFAULT_REGION),
        })
    }

    /// Overrides the table layout.
    pub fn with_layout(mut self, layout: TableLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Overrides the table name.
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Overrides the salary encoding.
    pub fn with_salary_encoding(mut self, encoding: SalaryEncoding) -> Self {
        self.salary_encoding = encoding;
        self
    }
}
