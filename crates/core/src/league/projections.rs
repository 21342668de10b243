//! Conversions between stored records and league entities.
//!
//! Decoding selects only the attributes an entity needs and fails without
//! producing a partial entity. Encoding merges in the key attributes from
//! [`super::keys`].

use crate::storage::{AttributeValue, Record};

use super::error::{LeagueError, Result};
use super::keys::{self, SalaryEncoding, PARTITION_KEY_ATTR, SORT_KEY_ATTR};
use super::types::{LeagueRecord, Player, RecordKind, Team};

pub const WINS_ATTR: &str = "Wins";
pub const PLAYER_NAME_ATTR: &str = "PlayerName";
pub const SALARY_ATTR: &str = "Salary";

// ============================================================================
// Team conversions
// ============================================================================

/// Convert a Team to a stored record.
pub fn record_from_team(team: &Team) -> Record {
    let key = keys::encode_team_key(&team.team_name);
    let mut record = Record::new();

    record.insert(
        PARTITION_KEY_ATTR.to_string(),
        AttributeValue::S(key.partition_key),
    );
    record.insert(SORT_KEY_ATTR.to_string(), AttributeValue::S(key.sort_key));
    record.insert(WINS_ATTR.to_string(), AttributeValue::number(team.wins));

    record
}

/// Convert a stored record to a Team.
pub fn team_from_record(record: &Record) -> Result<Team> {
    Ok(Team {
        team_name: get_string(record, PARTITION_KEY_ATTR)?,
        wins: get_number(record, WINS_ATTR)?,
    })
}

// ============================================================================
// Player conversions
// ============================================================================

/// Convert a Player to a stored record, keyed under `encoding`.
pub fn record_from_player(player: &Player, encoding: SalaryEncoding) -> Record {
    let key = encoding.player_key_unsigned(&player.team, player.salary);
    let mut record = Record::new();

    record.insert(
        PARTITION_KEY_ATTR.to_string(),
        AttributeValue::S(key.partition_key),
    );
    record.insert(SORT_KEY_ATTR.to_string(), AttributeValue::S(key.sort_key));
    record.insert(
        PLAYER_NAME_ATTR.to_string(),
        AttributeValue::S(player.player_name.clone()),
    );
    record.insert(SALARY_ATTR.to_string(), AttributeValue::number(player.salary));

    record
}

/// Convert a stored record to a Player.
pub fn player_from_record(record: &Record) -> Result<Player> {
    Ok(Player {
        player_name: get_string(record, PLAYER_NAME_ATTR)?,
        team: get_string(record, PARTITION_KEY_ATTR)?,
        salary: get_number(record, SALARY_ATTR)?,
    })
}

// ============================================================================
// Tagged decoding
// ============================================================================

/// Classify a record by its sort key and project it into the matching entity.
pub fn decode_record(record: &Record) -> Result<LeagueRecord> {
    let sort_key = get_string(record, SORT_KEY_ATTR)?;

    match keys::classify(&sort_key)? {
        RecordKind::Team => team_from_record(record).map(LeagueRecord::Team),
        RecordKind::Player => player_from_record(record).map(LeagueRecord::Player),
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
pub(super) fn get_string(record: &Record, key: &'static str) -> Result<String> {
    record
        .get(key)
        .and_then(AttributeValue::as_s)
        .map(str::to_string)
        .ok_or(LeagueError::MissingField(key))
}

/// Get a required non-negative number attribute that fits in `T`.
pub(super) fn get_number<T: std::str::FromStr>(record: &Record, key: &'static str) -> Result<T> {
    record
        .get(key)
        .and_then(AttributeValue::as_n)
        .and_then(|n| n.parse().ok())
        .ok_or(LeagueError::MissingField(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phillies() -> Team {
        Team::new("Phillies", 81)
    }

    fn harper() -> Player {
        Player::new("Bryce Harper", 11_538_462, "Phillies")
    }

    #[test]
    fn test_team_round_trip() {
        let team = phillies();
        let record = record_from_team(&team);
        assert_eq!(team_from_record(&record).unwrap(), team);
    }

    #[test]
    fn test_player_round_trip_under_both_encodings() {
        let player = harper();
        for encoding in [SalaryEncoding::Padded, SalaryEncoding::Reversed] {
            let record = record_from_player(&player, encoding);
            assert_eq!(player_from_record(&record).unwrap(), player);
        }
    }

    #[test]
    fn test_player_round_trip_extreme_salaries() {
        for salary in [0, u64::MAX] {
            let player = Player::new("Benchwarmer", salary, "Dodgers");
            let record = record_from_player(&player, SalaryEncoding::Padded);
            assert_eq!(player_from_record(&record).unwrap(), player);
        }
    }

    #[test]
    fn test_record_from_team_keys() {
        let record = record_from_team(&phillies());

        assert_eq!(
            record.get("TeamName"),
            Some(&AttributeValue::S("Phillies".to_string()))
        );
        assert_eq!(record.get("SK"), Some(&AttributeValue::S("TEAM#".to_string())));
        assert_eq!(record.get("Wins"), Some(&AttributeValue::number(81)));
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_record_from_player_keys() {
        let record = record_from_player(&harper(), SalaryEncoding::Reversed);

        assert_eq!(
            record.get("SK"),
            Some(&AttributeValue::S("PLAYER#26483511".to_string()))
        );
        assert_eq!(
            record.get("PlayerName"),
            Some(&AttributeValue::S("Bryce Harper".to_string()))
        );
        assert_eq!(record.get("Salary"), Some(&AttributeValue::number(11_538_462)));
    }

    #[test]
    fn test_team_from_record_missing_wins() {
        let mut record = record_from_team(&phillies());
        record.remove("Wins");

        assert_eq!(
            team_from_record(&record),
            Err(LeagueError::MissingField("Wins"))
        );
    }

    #[test]
    fn test_team_from_record_rejects_negative_wins() {
        let mut record = record_from_team(&phillies());
        record.insert("Wins".to_string(), AttributeValue::number(-3));

        assert_eq!(
            team_from_record(&record),
            Err(LeagueError::MissingField("Wins"))
        );
    }

    #[test]
    fn test_team_from_record_rejects_string_wins() {
        let mut record = record_from_team(&phillies());
        record.insert("Wins".to_string(), AttributeValue::S("81".to_string()));

        assert_eq!(
            team_from_record(&record),
            Err(LeagueError::MissingField("Wins"))
        );
    }

    #[test]
    fn test_player_from_record_missing_name() {
        let mut record = record_from_player(&harper(), SalaryEncoding::Padded);
        record.remove("PlayerName");

        assert_eq!(
            player_from_record(&record),
            Err(LeagueError::MissingField("PlayerName"))
        );
    }

    #[test]
    fn test_player_from_record_rejects_fractional_salary() {
        let mut record = record_from_player(&harper(), SalaryEncoding::Padded);
        record.insert("Salary".to_string(), AttributeValue::N("1.5".to_string()));

        assert_eq!(
            player_from_record(&record),
            Err(LeagueError::MissingField("Salary"))
        );
    }

    #[test]
    fn test_decode_record_produces_tagged_variant() {
        let team = decode_record(&record_from_team(&phillies())).unwrap();
        assert_eq!(team, LeagueRecord::Team(phillies()));

        let player =
            decode_record(&record_from_player(&harper(), SalaryEncoding::Padded)).unwrap();
        assert_eq!(player, LeagueRecord::Player(harper()));
    }

    #[test]
    fn test_decode_record_unknown_kind() {
        let mut record = record_from_team(&phillies());
        record.insert("SK".to_string(), AttributeValue::S("COACH#".to_string()));

        assert_eq!(
            decode_record(&record),
            Err(LeagueError::UnknownRecordKind("COACH#".to_string()))
        );
    }

    #[test]
    fn test_decode_record_missing_sort_key() {
        let mut record = record_from_team(&phillies());
        record.remove("SK");

        assert_eq!(decode_record(&record), Err(LeagueError::MissingField("SK")));
    }
}
