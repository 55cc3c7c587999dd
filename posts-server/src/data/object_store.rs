use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::Object;
use tracing::debug;

use crate::domain::error::DomainError;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Keys of a single listing call, in the order the store returned them.
    async fn list_keys(&self, bucket: &str) -> Result<Vec<String>, DomainError>;
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, DomainError>;
}

/// Keys of the listed objects in listing order; entries without a key are skipped.
fn listed_keys(objects: &[Object]) -> Vec<String> {
    objects
        .iter()
        .filter_map(|object| object.key().map(str::to_owned))
        .collect()
}

#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list_keys(&self, bucket: &str) -> Result<Vec<String>, DomainError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| {
                debug!(bucket, "failed to list objects: {}", DisplayErrorContext(&e));
                DomainError::Listing {
                    bucket: bucket.to_owned(),
                    reason: DisplayErrorContext(&e).to_string(),
                }
            })?;

        if output.is_truncated() == Some(true) {
            debug!(bucket, "listing truncated, processing first page only");
        }

        let keys = listed_keys(output.contents());

        debug!(bucket, count = keys.len(), "objects listed");
        Ok(keys)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, DomainError> {
        let fetch_error = |reason: String| DomainError::ObjectFetch {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            reason,
        };

        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                debug!(bucket, key, "failed to get object: {}", DisplayErrorContext(&e));
                fetch_error(DisplayErrorContext(&e).to_string())
            })?;

        let body = output.body.collect().await.map_err(|e| {
            debug!(bucket, key, "failed to read object body: {}", e);
            fetch_error(e.to_string())
        })?;

        Ok(body.into_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(key: &str) -> Object {
        Object::builder().key(key).build()
    }

    #[test]
    fn listed_keys_skip_entries_without_key() {
        let objects = vec![
            object("post_B"),
            Object::builder().build(),
            object("post_A"),
        ];

        assert_eq!(listed_keys(&objects), vec!["post_B", "post_A"]);
    }

    #[test]
    fn empty_listing_has_no_keys() {
        assert!(listed_keys(&[]).is_empty());
    }
}
