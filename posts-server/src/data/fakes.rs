//! In-memory stores for exercising the aggregation without AWS or HTTP.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::data::cover_source::CoverSource;
use crate::data::metadata_store::MetadataStore;
use crate::data::object_store::ObjectStore;
use crate::domain::error::DomainError;
use crate::domain::post::{AUTHOR_ATTRIBUTE, CoverImage, MetadataRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(String),
    Get(String, String),
    Lookup(String, String),
    Cover,
}

#[derive(Default)]
pub struct CallLog(Mutex<Vec<Call>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| matches(c)).count()
    }
}

/// A bucket whose listing order is the insertion order.
#[derive(Default)]
pub struct FakeObjectStore {
    objects: Vec<(String, Vec<u8>)>,
    fail_listing: bool,
    pub log: CallLog,
}

impl FakeObjectStore {
    pub fn with_object(mut self, key: &str, body: impl Into<Vec<u8>>) -> Self {
        self.objects.push((key.to_owned(), body.into()));
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn list_keys(&self, bucket: &str) -> Result<Vec<String>, DomainError> {
        self.log.push(Call::List(bucket.to_owned()));
        if self.fail_listing {
            return Err(DomainError::Listing {
                bucket: bucket.to_owned(),
                reason: "access denied".into(),
            });
        }
        Ok(self.objects.iter().map(|(key, _)| key.clone()).collect())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, DomainError> {
        self.log.push(Call::Get(bucket.to_owned(), key.to_owned()));
        self.objects
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, body)| body.clone())
            .ok_or_else(|| DomainError::ObjectFetch {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
                reason: "NoSuchKey".into(),
            })
    }
}

#[derive(Default)]
pub struct FakeMetadataStore {
    records: HashMap<String, MetadataRecord>,
    pub log: CallLog,
}

impl FakeMetadataStore {
    pub fn with_author(self, key: &str, author: &str) -> Self {
        self.with_record(
            key,
            [("id", key), (AUTHOR_ATTRIBUTE, author)].into_iter().collect(),
        )
    }

    pub fn with_record(mut self, key: &str, record: MetadataRecord) -> Self {
        self.records.insert(key.to_owned(), record);
        self
    }
}

#[async_trait]
impl MetadataStore for FakeMetadataStore {
    async fn get_record(
        &self,
        table: &str,
        key: &str,
    ) -> Result<Option<MetadataRecord>, DomainError> {
        self.log.push(Call::Lookup(table.to_owned(), key.to_owned()));
        Ok(self.records.get(key).cloned())
    }
}

pub struct FakeCoverSource {
    cover: Option<CoverImage>,
    pub log: CallLog,
}

impl FakeCoverSource {
    pub fn serving(cover: CoverImage) -> Self {
        Self {
            cover: Some(cover),
            log: CallLog::default(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            cover: None,
            log: CallLog::default(),
        }
    }
}

#[async_trait]
impl CoverSource for FakeCoverSource {
    async fn fetch_cover(&self) -> Result<CoverImage, DomainError> {
        self.log.push(Call::Cover);
        self.cover.clone().ok_or_else(|| DomainError::Image {
            url: "http://placeholder.test/600".into(),
            reason: "HTTP status server error (502 Bad Gateway)".into(),
        })
    }
}
