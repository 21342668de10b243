use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{LeagueError, Result};

/// How teams and players are spread across tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableLayout {
    /// One table, one partition per team holding the team and its players.
    #[default]
    SingleTable,
    /// A team table and a player table with a salary index.
    MultiTable,
}

impl TableLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            TableLayout::SingleTable => "single-table",
            TableLayout::MultiTable => "multi-table",
        }
    }
}

impl fmt::Display for TableLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableLayout {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "single-table" | "single" => Ok(TableLayout::SingleTable),
            "multi-table" | "multi" => Ok(TableLayout::MultiTable),
            _ => Err(LeagueError::InvalidArgument(format!(
                "unknown table layout: {s} (expected 'single-table' or 'multi-table')"
            ))),
        }
    }
}
