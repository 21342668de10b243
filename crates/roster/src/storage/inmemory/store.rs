//! In-memory item store.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use roster_core::league::LEAGUE_TABLE_SCHEMA;
use roster_core::storage::{
    AttributeValue, ItemKey, ItemQuery, ItemStore, QueryOrder, Record, Result, TableSchema,
};

/// In-memory storage backend.
///
/// Cloning shares the underlying map. Data is lost when the last clone is
/// dropped.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    schema: TableSchema,
    records: Arc<RwLock<BTreeMap<ItemKey, Record>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates a new empty store laid out as the shared league table.
    pub fn new() -> Self {
        Self::with_schema(LEAGUE_TABLE_SCHEMA)
    }

    /// Creates a new empty store with the given key layout.
    pub fn with_schema(schema: TableSchema) -> Self {
        Self {
            schema,
            records: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    #[cfg(test)]
    async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn put(&self, key: &ItemKey, record: Record) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(key.clone(), record);
        Ok(())
    }

    async fn get(&self, key: &ItemKey) -> Result<Option<Record>> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn query(&self, query: &ItemQuery) -> Result<Vec<Record>> {
        let records = self.records.read().await;

        // Keys order by partition first, so one partition is a contiguous range
        let start = ItemKey::new(query.partition_key.as_str(), "");
        let partition = records
            .range(start..)
            .take_while(|(key, _)| key.partition_key == query.partition_key);

        let index_attribute = match query.index {
            Some(_) => self.schema.range_attribute(query)?,
            None => None,
        };

        let mut matched: Vec<&Record> = match index_attribute {
            None => partition
                .filter(|(key, _)| query.condition.matches(&key.sort_key))
                .map(|(_, record)| record)
                .collect(),
            Some(attribute) => {
                // An index holds only the records that carry its sort attribute;
                // ties keep primary key order
                let mut indexed: Vec<(&AttributeValue, &Record)> = partition
                    .filter_map(|(_, record)| record.get(attribute).map(|value| (value, record)))
                    .filter(|(value, _)| query.condition.matches(attribute_text(value)))
                    .collect();
                indexed.sort_by(|(a, _), (b, _)| compare_attributes(a, b));
                indexed.into_iter().map(|(_, record)| record).collect()
            }
        };

        if query.order == QueryOrder::Descending {
            matched.reverse();
        }

        let limit = query.limit.map_or(usize::MAX, |l| l as usize);
        let result: Vec<Record> = matched.into_iter().take(limit).cloned().collect();

        tracing::debug!(
            partition = %query.partition_key,
            index = query.index.as_deref().unwrap_or("-"),
            returned = result.len(),
            "In-memory query"
        );
        Ok(result)
    }
}

fn attribute_text(value: &AttributeValue) -> &str {
    match value {
        AttributeValue::S(text) | AttributeValue::N(text) => text,
    }
}

/// Orders numbers by value and strings by bytes, as DynamoDB does.
fn compare_attributes(a: &AttributeValue, b: &AttributeValue) -> Ordering {
    match (a, b) {
        (AttributeValue::N(a), AttributeValue::N(b)) => {
            match (a.parse::<i128>(), b.parse::<i128>()) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => a.cmp(b),
            }
        }
        _ => attribute_text(a).cmp(attribute_text(b)),
    }
}

#[cfg(test)]
mod tests {
    use roster_core::league::multitable::{PLAYER_TABLE_SCHEMA, TEAM_TABLE_SCHEMA};
    use roster_core::league::{
        seed_players, seed_teams, Player, SalaryEncoding, Team, PLAYER_NAME_ATTR, SALARY_ATTR,
    };
    use roster_core::service::{
        LeagueOperations, LeagueService, MultiTableLeagueService, ServiceError,
    };
    use roster_core::storage::RepositoryError;

    use super::*;

    fn record(name: &str) -> Record {
        let mut record = Record::new();
        record.insert(
            PLAYER_NAME_ATTR.to_string(),
            AttributeValue::S(name.to_string()),
        );
        record
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records
            .iter()
            .filter_map(|r| r.get(PLAYER_NAME_ATTR).and_then(AttributeValue::as_s))
            .collect()
    }

    async fn store_with(keys: &[(&str, &str)]) -> InMemoryStore {
        let store = InMemoryStore::new();
        for (pk, sk) in keys {
            store
                .put(&ItemKey::new(*pk, *sk), record(&format!("{pk}/{sk}")))
                .await
                .unwrap();
        }
        store
    }

    // ------------------------------------------------------------------------
    // Store behavior
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_put_get_and_overwrite() {
        let store = InMemoryStore::new();
        let key = ItemKey::new("Phillies", "TEAM#");

        assert_eq!(store.get(&key).await.unwrap(), None);

        store.put(&key, record("first")).await.unwrap();
        store.put(&key, record("second")).await.unwrap();

        assert_eq!(store.get(&key).await.unwrap(), Some(record("second")));
        assert_eq!(store.record_count().await, 1);
    }

    #[tokio::test]
    async fn test_query_stays_within_partition() {
        let store = store_with(&[
            ("Dodgers", "TEAM#"),
            ("Phillies", "PLAYER#1"),
            ("Phillies", "TEAM#"),
            ("Phillies2", "TEAM#"),
        ])
        .await;

        let records = store.query(&ItemQuery::partition("Phillies")).await.unwrap();

        assert_eq!(names(&records), vec!["Phillies/PLAYER#1", "Phillies/TEAM#"]);
    }

    #[tokio::test]
    async fn test_query_order_prefix_and_limit() {
        let store = store_with(&[
            ("Phillies", "PLAYER#1"),
            ("Phillies", "PLAYER#3"),
            ("Phillies", "PLAYER#2"),
            ("Phillies", "TEAM#"),
        ])
        .await;

        let descending = store
            .query(&ItemQuery::partition("Phillies").descending())
            .await
            .unwrap();
        assert_eq!(
            names(&descending),
            vec![
                "Phillies/TEAM#",
                "Phillies/PLAYER#3",
                "Phillies/PLAYER#2",
                "Phillies/PLAYER#1"
            ]
        );

        let players = store
            .query(&ItemQuery::partition("Phillies").begins_with("PLAYER#").limit(2))
            .await
            .unwrap();
        assert_eq!(names(&players), vec!["Phillies/PLAYER#1", "Phillies/PLAYER#2"]);

        let top = store
            .query(
                &ItemQuery::partition("Phillies")
                    .begins_with("PLAYER#")
                    .descending()
                    .limit(1),
            )
            .await
            .unwrap();
        assert_eq!(names(&top), vec!["Phillies/PLAYER#3"]);

        let exact = store
            .query(&ItemQuery::partition("Phillies").equals("PLAYER#2"))
            .await
            .unwrap();
        assert_eq!(names(&exact), vec!["Phillies/PLAYER#2"]);
    }

    #[tokio::test]
    async fn test_query_unknown_partition_is_empty() {
        let store = store_with(&[("Phillies", "TEAM#")]).await;
        let records = store.query(&ItemQuery::partition("Expos")).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let store = InMemoryStore::new();
        let clone = store.clone();
        clone
            .put(&ItemKey::new("Phillies", "TEAM#"), record("shared"))
            .await
            .unwrap();
        assert_eq!(store.record_count().await, 1);
    }

    // ------------------------------------------------------------------------
    // League service over the in-memory store
    // ------------------------------------------------------------------------

    async fn seeded(encoding: SalaryEncoding) -> LeagueService<InMemoryStore> {
        let service = LeagueService::new(InMemoryStore::new(), encoding);
        service
            .seed_league(&seed_teams(), &seed_players())
            .await
            .unwrap();
        service
    }

    #[tokio::test]
    async fn test_phillies_end_to_end() {
        let service = LeagueService::new(InMemoryStore::new(), SalaryEncoding::Reversed);
        service.write_team("Phillies", 81).await.unwrap();
        service
            .write_player("Bryce Harper", 11_538_462, "Phillies")
            .await
            .unwrap();
        service
            .write_player("Rhys Hoskins", 57_500, "Phillies")
            .await
            .unwrap();

        assert_eq!(
            service.read_team("Phillies").await.unwrap(),
            Team::new("Phillies", 81)
        );

        let players = service.list_players_by_team("Phillies").await.unwrap();
        let names: Vec<&str> = players.iter().map(|p| p.player_name.as_str()).collect();
        assert_eq!(names, vec!["Bryce Harper", "Rhys Hoskins"]);

        let top = service.highest_paid_player("Phillies").await.unwrap();
        assert_eq!(
            top,
            Some(Player::new("Bryce Harper", 11_538_462, "Phillies"))
        );

        let store = service.into_store();
        let harper = store
            .get(&ItemKey::new("Phillies", "PLAYER#26483511"))
            .await
            .unwrap();
        assert!(harper.is_some());
    }

    #[tokio::test]
    async fn test_summary_lists_team_then_players_by_salary() {
        let service = seeded(SalaryEncoding::Padded).await;

        let summary = service.read_team_summary("Yankees").await.unwrap();

        assert_eq!(summary.team, Team::new("Yankees", 103));
        let names: Vec<&str> = summary
            .players
            .iter()
            .map(|p| p.player_name.as_str())
            .collect();
        assert_eq!(names, vec!["Giancarlo Stanton", "J.A. Happ"]);
    }

    #[tokio::test]
    async fn test_highest_paid_across_digit_counts() {
        for encoding in [SalaryEncoding::Padded, SalaryEncoding::Reversed] {
            let service = LeagueService::new(InMemoryStore::new(), encoding);
            service.write_team("Mets", 86).await.unwrap();
            service.write_player("Bench", 90, "Mets").await.unwrap();
            service.write_player("Ace", 200, "Mets").await.unwrap();

            let top = service.highest_paid_player("Mets").await.unwrap();
            assert_eq!(
                top.map(|p| p.player_name),
                Some("Ace".to_string()),
                "encoding {encoding}"
            );
        }
    }

    #[tokio::test]
    async fn test_reversed_listing_is_not_salary_ordered() {
        let service = LeagueService::new(InMemoryStore::new(), SalaryEncoding::Reversed);
        service.write_player("Bench", 90, "Mets").await.unwrap();
        service.write_player("Ace", 200, "Mets").await.unwrap();

        // "PLAYER#09" sorts above "PLAYER#002"
        let players = service.list_players_by_team("Mets").await.unwrap();
        assert_eq!(players[0].player_name, "Bench");
    }

    #[tokio::test]
    async fn test_team_without_players() {
        let service = LeagueService::new(InMemoryStore::new(), SalaryEncoding::Padded);
        service.write_team("Expos", 0).await.unwrap();

        assert!(service
            .list_players_by_team("Expos")
            .await
            .unwrap()
            .is_empty());
        assert_eq!(service.highest_paid_player("Expos").await.unwrap(), None);

        let summary = service.read_team_summary("Expos").await.unwrap();
        assert!(summary.players.is_empty());
    }

    #[tokio::test]
    async fn test_players_without_team_record() {
        let service = LeagueService::new(InMemoryStore::new(), SalaryEncoding::Padded);
        service
            .write_player("Rhys Hoskins", 57_500, "Phillies")
            .await
            .unwrap();

        assert!(matches!(
            service.read_team("Phillies").await,
            Err(ServiceError::NotFound { .. })
        ));
        assert_eq!(
            service.list_players_by_team("Phillies").await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_rewrite_team_replaces_wins() {
        let service = LeagueService::new(InMemoryStore::new(), SalaryEncoding::Padded);
        service.write_team("Phillies", 81).await.unwrap();
        service.write_team("Phillies", 90).await.unwrap();

        assert_eq!(service.read_team("Phillies").await.unwrap().wins, 90);
    }

    #[tokio::test]
    async fn test_equal_salaries_collide() {
        let service = LeagueService::new(InMemoryStore::new(), SalaryEncoding::Padded);
        service.write_player("First", 1_000, "Mets").await.unwrap();
        service.write_player("Second", 1_000, "Mets").await.unwrap();

        let players = service.list_players_by_team("Mets").await.unwrap();
        assert_eq!(players, vec![Player::new("Second", 1_000, "Mets")]);
    }

    #[tokio::test]
    async fn test_zero_salary_player() {
        let service = LeagueService::new(InMemoryStore::new(), SalaryEncoding::Reversed);
        let player = service.write_player("Walk-on", 0, "Mets").await.unwrap();
        assert_eq!(player.salary, 0);

        let store = service.into_store();
        assert!(store
            .get(&ItemKey::new("Mets", "PLAYER#0"))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_read_player_scans_team_players() {
        let service = seeded(SalaryEncoding::Padded).await;

        assert_eq!(
            service.read_player("Yankees", "J.A. Happ").await.unwrap(),
            Player::new("J.A. Happ", 17_000_000, "Yankees")
        );
        assert!(matches!(
            service.read_player("Yankees", "Bryce Harper").await,
            Err(ServiceError::NotFound {
                entity_type: "Player",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_mixed_encodings_list_player_twice() {
        let store = InMemoryStore::new();
        LeagueService::new(store.clone(), SalaryEncoding::Padded)
            .write_player("Rhys Hoskins", 57_500, "Phillies")
            .await
            .unwrap();
        let service = LeagueService::new(store, SalaryEncoding::Reversed);
        service
            .write_player("Rhys Hoskins", 57_500, "Phillies")
            .await
            .unwrap();

        let players = service.list_players_by_team("Phillies").await.unwrap();
        assert_eq!(players.len(), 2);
        assert!(players.iter().all(|p| p.player_name == "Rhys Hoskins"));
    }

    // ------------------------------------------------------------------------
    // Local secondary index queries
    // ------------------------------------------------------------------------

    fn salaried(name: &str, salary: u64) -> Record {
        let mut record = record(name);
        record.insert(SALARY_ATTR.to_string(), AttributeValue::number(salary));
        record
    }

    async fn player_store(players: &[(&str, Option<u64>)]) -> InMemoryStore {
        let store = InMemoryStore::with_schema(PLAYER_TABLE_SCHEMA);
        for (name, salary) in players {
            let value = match salary {
                Some(salary) => salaried(name, *salary),
                None => record(name),
            };
            store.put(&ItemKey::new("Mets", *name), value).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_index_query_orders_by_number() {
        let store = player_store(&[
            ("Ace", Some(200)),
            ("Bench", Some(90)),
            ("Closer", Some(1_000)),
        ])
        .await;

        let by_name = store.query(&ItemQuery::partition("Mets")).await.unwrap();
        assert_eq!(names(&by_name), vec!["Ace", "Bench", "Closer"]);

        let by_salary = store
            .query(&ItemQuery::partition("Mets").index("TeamSalary"))
            .await
            .unwrap();
        assert_eq!(names(&by_salary), vec!["Bench", "Ace", "Closer"]);

        let top = store
            .query(
                &ItemQuery::partition("Mets")
                    .index("TeamSalary")
                    .descending()
                    .limit(1),
            )
            .await
            .unwrap();
        assert_eq!(names(&top), vec!["Closer"]);
    }

    #[tokio::test]
    async fn test_index_skips_records_without_attribute() {
        let store = player_store(&[("Ace", Some(200)), ("Scout", None)]).await;

        let by_salary = store
            .query(&ItemQuery::partition("Mets").index("TeamSalary"))
            .await
            .unwrap();
        assert_eq!(names(&by_salary), vec!["Ace"]);
        assert_eq!(store.record_count().await, 2);
    }

    #[tokio::test]
    async fn test_unknown_index_fails() {
        let store = InMemoryStore::new();

        let result = store
            .query(&ItemQuery::partition("Mets").index("TeamSalary"))
            .await;
        assert_eq!(
            result,
            Err(RepositoryError::QueryFailed(
                "unknown index: TeamSalary".to_string()
            ))
        );
    }

    // ------------------------------------------------------------------------
    // Multi-table service over the in-memory store
    // ------------------------------------------------------------------------

    async fn seeded_tables() -> MultiTableLeagueService<InMemoryStore> {
        let service = MultiTableLeagueService::new(
            InMemoryStore::with_schema(TEAM_TABLE_SCHEMA),
            InMemoryStore::with_schema(PLAYER_TABLE_SCHEMA),
        );
        service
            .seed_league(&seed_teams(), &seed_players())
            .await
            .unwrap();
        service
    }

    #[tokio::test]
    async fn test_multi_table_phillies_end_to_end() {
        let service = seeded_tables().await;

        assert_eq!(
            service.read_team("Phillies").await.unwrap(),
            Team::new("Phillies", 81)
        );
        assert_eq!(
            service.read_player("Phillies", "Rhys Hoskins").await.unwrap(),
            Player::new("Rhys Hoskins", 57_500, "Phillies")
        );

        let players = service.list_players_by_team("Phillies").await.unwrap();
        let names: Vec<&str> = players.iter().map(|p| p.player_name.as_str()).collect();
        assert_eq!(names, vec!["Bryce Harper", "Rhys Hoskins"]);

        assert_eq!(
            service.highest_paid_player("Phillies").await.unwrap(),
            Some(Player::new("Bryce Harper", 11_538_462, "Phillies"))
        );

        let (teams, _) = service.into_stores();
        assert!(teams
            .get(&ItemKey::partition_only("team_Phillies"))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_multi_table_highest_paid_across_digit_counts() {
        let service = MultiTableLeagueService::new(
            InMemoryStore::with_schema(TEAM_TABLE_SCHEMA),
            InMemoryStore::with_schema(PLAYER_TABLE_SCHEMA),
        );
        service.write_player("Ace", 200, "Mets").await.unwrap();
        service.write_player("Bench", 90, "Mets").await.unwrap();
        service.write_player("Max", i64::MAX, "Mets").await.unwrap();

        let top = service.highest_paid_player("Mets").await.unwrap();
        assert_eq!(top.map(|p| p.player_name), Some("Max".to_string()));
    }

    #[tokio::test]
    async fn test_multi_table_summary_orders_by_salary() {
        let service = seeded_tables().await;

        let summary = service.read_team_summary("Yankees").await.unwrap();

        assert_eq!(summary.team, Team::new("Yankees", 103));
        let names: Vec<&str> = summary
            .players
            .iter()
            .map(|p| p.player_name.as_str())
            .collect();
        assert_eq!(names, vec!["Giancarlo Stanton", "J.A. Happ"]);
    }

    #[tokio::test]
    async fn test_multi_table_rewrite_player_replaces_salary() {
        let service = seeded_tables().await;
        service
            .write_player("Rhys Hoskins", 20_000_000, "Phillies")
            .await
            .unwrap();

        assert_eq!(service.list_players_by_team("Phillies").await.unwrap().len(), 2);
        assert_eq!(
            service
                .highest_paid_player("Phillies")
                .await
                .unwrap()
                .map(|p| p.player_name),
            Some("Rhys Hoskins".to_string())
        );
    }
}
