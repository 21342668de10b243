mod error;
mod keys;
mod layout;
mod mock_data;
pub mod multitable;
mod projections;
mod summary;
mod types;

pub use error::{LeagueError, Result};
pub use keys::{
    classify, encode_player_key, encode_team_key, player_sort_key_prefix, reverse_digit_string,
    validate_salary, SalaryEncoding, LEAGUE_TABLE_SCHEMA, PARTITION_KEY_ATTR,
    PLAYER_SORT_KEY_PREFIX, SORT_KEY_ATTR, TEAM_SORT_KEY,
};
pub use layout::TableLayout;
pub use mock_data::{seed_players, seed_teams};
pub use projections::{
    decode_record, player_from_record, record_from_player, record_from_team, team_from_record,
    PLAYER_NAME_ATTR, SALARY_ATTR, WINS_ATTR,
};
pub use summary::assemble;
pub use types::{LeagueRecord, Player, RecordKind, Team, TeamSummary};
