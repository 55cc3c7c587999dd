use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::post::MetadataRecord;

pub const KEY_ATTRIBUTE: &str = "id";

#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// `Ok(None)` when the table holds no record for `key`.
    async fn get_record(
        &self,
        table: &str,
        key: &str,
    ) -> Result<Option<MetadataRecord>, DomainError>;
}

/// Keeps the string attributes of an item; every other attribute type is dropped.
fn record_from_item(item: HashMap<String, AttributeValue>) -> MetadataRecord {
    item.into_iter()
        .filter_map(|(name, value)| match value {
            AttributeValue::S(text) => Some((name, text)),
            _ => None,
        })
        .collect()
}

#[derive(Clone)]
pub struct DynamoMetadataStore {
    client: Client,
}

impl DynamoMetadataStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MetadataStore for DynamoMetadataStore {
    async fn get_record(
        &self,
        table: &str,
        key: &str,
    ) -> Result<Option<MetadataRecord>, DomainError> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .key(KEY_ATTRIBUTE, AttributeValue::S(key.to_owned()))
            .send()
            .await
            .map_err(|e| {
                debug!(table, key, "failed to get item: {}", DisplayErrorContext(&e));
                DomainError::MetadataLookup {
                    table: table.to_owned(),
                    key: key.to_owned(),
                    reason: DisplayErrorContext(&e).to_string(),
                }
            })?;

        Ok(output.item.map(record_from_item))
    }
}
