//! DynamoDB item store.

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::query::builders::QueryFluentBuilder;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use roster_core::storage::{
    ItemKey, ItemQuery, ItemStore, QueryOrder, Record, RepositoryError, Result, TableSchema,
};

use super::conversions::{
    item_to_record, key_condition_expression, key_to_item, record_to_item, sort_key_operand,
    Item, PK_VALUE, SK_VALUE,
};
use super::error::{map_get_item_error, map_put_item_error, map_query_error};
use crate::config::Config;

/// DynamoDB-based item store.
///
/// Holds a client, the table name and its key layout; all state lives in the
/// table.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
    schema: TableSchema,
}

/// Creates a DynamoDB client from application configuration.
///
/// Uses the AWS SDK default credential chain. `endpoint_url` points the
/// client at DynamoDB Local when set.
pub async fn create_client(config: &Config) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}

impl DynamoDbStore {
    /// Creates a store over one table with the given key layout.
    pub fn new(client: Client, table_name: impl Into<String>, schema: TableSchema) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            schema,
        }
    }

    /// Builds one page of a partition or index query.
    ///
    /// A sort key condition is compared as a string, so it only applies to
    /// string range attributes.
    fn query_page(
        &self,
        query: &ItemQuery,
        start_key: Option<Item>,
    ) -> Result<QueryFluentBuilder> {
        let range_attribute = self.schema.range_attribute(query)?;

        let mut request = self
            .client
            .query()
            .table_name(&self.table_name)
            .set_index_name(query.index.clone())
            .key_condition_expression(key_condition_expression(&query.condition))
            .expression_attribute_names("#pk", self.schema.partition_key)
            .expression_attribute_values(PK_VALUE, AttributeValue::S(query.partition_key.clone()))
            .scan_index_forward(query.order == QueryOrder::Ascending)
            .set_exclusive_start_key(start_key);

        if let Some(operand) = sort_key_operand(&query.condition) {
            let attribute = range_attribute.ok_or_else(|| {
                RepositoryError::QueryFailed(format!(
                    "table {} has no sort key to match {operand}",
                    self.table_name
                ))
            })?;
            request = request
                .expression_attribute_names("#sk", attribute)
                .expression_attribute_values(SK_VALUE, AttributeValue::S(operand.to_string()));
        }

        Ok(request)
    }
}

#[async_trait]
impl ItemStore for DynamoDbStore {
    async fn put(&self, key: &ItemKey, record: Record) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(key, record, &self.schema)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        tracing::debug!(
            table = %self.table_name,
            partition = %key.partition_key,
            sort_key = %key.sort_key,
            "PutItem"
        );
        Ok(())
    }

    async fn get(&self, key: &ItemKey) -> Result<Option<Record>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_item(key, &self.schema)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_record(&item)?)),
            None => Ok(None),
        }
    }

    async fn query(&self, query: &ItemQuery) -> Result<Vec<Record>> {
        if query.limit == Some(0) {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        let mut start_key = None;
        let mut pages = 0_u32;

        // A page stops at 1 MB; follow LastEvaluatedKey until the range or
        // the limit is exhausted
        loop {
            let mut request = self.query_page(query, start_key.take())?;
            if let Some(limit) = query.limit {
                let remaining = limit.saturating_sub(records.len() as u32);
                request = request.limit(i32::try_from(remaining).unwrap_or(i32::MAX));
            }

            let result = request.send().await.map_err(map_query_error)?;
            pages += 1;

            for item in result.items() {
                records.push(item_to_record(item)?);
            }

            let limit_reached = query
                .limit
                .is_some_and(|limit| records.len() >= limit as usize);

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() && !limit_reached => start_key = Some(key),
                _ => break,
            }
        }

        tracing::debug!(
            table = %self.table_name,
            partition = %query.partition_key,
            index = query.index.as_deref().unwrap_or("-"),
            returned = records.len(),
            pages,
            "Query"
        );
        Ok(records)
    }
}
