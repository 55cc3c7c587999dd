use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::domain::error::DomainError;

pub const AUTHOR_ATTRIBUTE: &str = "author";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: String,
    pub author: String,
    pub content: String,
    pub cover: String,
}

impl Post {
    pub fn new(id: String, author: String, content: String, cover: &CoverImage) -> Self {
        Self {
            id,
            author,
            content,
            cover: cover.to_data_uri(),
        }
    }
}

/// Decodes a stored object body as UTF-8 text.
pub fn decode_content(key: &str, body: Vec<u8>) -> Result<String, DomainError> {
    String::from_utf8(body).map_err(|e| DomainError::Decode {
        key: key.to_owned(),
        source: e.utf8_error(),
    })
}

/// String attributes of a single metadata item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    attributes: HashMap<String, String>,
}

impl MetadataRecord {
    pub fn new(attributes: HashMap<String, String>) -> Self {
        Self { attributes }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn author(&self, key: &str) -> Result<&str, DomainError> {
        self.get(AUTHOR_ATTRIBUTE)
            .ok_or_else(|| DomainError::MissingField {
                key: key.to_owned(),
                field: AUTHOR_ATTRIBUTE,
            })
    }
}

impl<K, V> FromIterator<(K, V)> for MetadataRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl CoverImage {
    pub fn new(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}
