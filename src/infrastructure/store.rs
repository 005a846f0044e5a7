use crate::config::AppConfig;
use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// One stored record, keyed by attribute name.
pub type Item = HashMap<String, AttributeValue>;

/// Narrow key-value/document store interface: point get, unconditional put
/// (upsert, last write wins) and full-table scan with an optional equality
/// filter. Scan results carry no ordering guarantee.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_item(&self, table: &str, key_attr: &str, key: &str) -> Result<Option<Item>>;

    async fn put_item(&self, table: &str, item: Item) -> Result<()>;

    async fn scan(&self, table: &str, filter: Option<(&str, &str)>) -> Result<Vec<Item>>;

    /// Check if the store is reachable
    async fn ping(&self) -> bool;
}

/// DynamoDB-backed store
pub struct DynamoStore {
    client: Client,
}

impl DynamoStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl DocumentStore for DynamoStore {
    async fn get_item(&self, table: &str, key_attr: &str, key: &str) -> Result<Option<Item>> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .key(key_attr, AttributeValue::S(key.to_string()))
            .send()
            .await
            .with_context(|| format!("GetItem failed on table {table}"))?;

        Ok(output.item)
    }

    async fn put_item(&self, table: &str, item: Item) -> Result<()> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await
            .with_context(|| format!("PutItem failed on table {table}"))?;

        Ok(())
    }

    async fn scan(&self, table: &str, filter: Option<(&str, &str)>) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        let mut last_key: Option<Item> = None;

        // A single Scan page is capped at 1 MB, so follow LastEvaluatedKey
        loop {
            let mut request = self.client.scan().table_name(table);

            if let Some((attr, value)) = filter {
                request = request
                    .filter_expression("#attr = :value")
                    .expression_attribute_names("#attr", attr)
                    .expression_attribute_values(":value", AttributeValue::S(value.to_string()));
            }

            if let Some(key) = last_key.take() {
                request = request.set_exclusive_start_key(Some(key));
            }

            let output = request
                .send()
                .await
                .with_context(|| format!("Scan failed on table {table}"))?;

            items.extend(output.items.unwrap_or_default());

            last_key = output.last_evaluated_key;
            if last_key.is_none() {
                break;
            }
        }

        Ok(items)
    }

    async fn ping(&self) -> bool {
        self.client.list_tables().limit(1).send().await.is_ok()
    }
}

/// Build the DynamoDB client and verify every configured table is reachable.
/// A failure here is fatal: the caller is expected to abort startup.
pub async fn setup_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>> {
    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()))
        .load()
        .await;
    let client = Client::new(&aws_config);

    info!("📂 DynamoDB region: {}", config.aws_region);

    for table in [
        config.users_table.as_str(),
        config.events_table.as_str(),
        config.files_table.as_str(),
    ] {
        client
            .describe_table()
            .table_name(table)
            .send()
            .await
            .with_context(|| format!("DynamoDB connection check failed for table {table}"))?;
    }

    info!("✅ DynamoDB connection established");

    Ok(Arc::new(DynamoStore::new(client)))
}
