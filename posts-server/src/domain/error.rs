use std::error::Error as _;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

pub const FAILURE_MESSAGE: &str = "Unable to load posts";

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("failed to list objects in bucket {bucket}: {reason}")]
    Listing { bucket: String, reason: String },
    #[error("failed to fetch object {key} from bucket {bucket}: {reason}")]
    ObjectFetch {
        bucket: String,
        key: String,
        reason: String,
    },
    #[error("failed to look up metadata for {key} in table {table}: {reason}")]
    MetadataLookup {
        table: String,
        key: String,
        reason: String,
    },
    #[error("no metadata record for {key} in table {table}")]
    MetadataNotFound { table: String, key: String },
    #[error("metadata record for {key} has no string attribute `{field}`")]
    MissingField { key: String, field: &'static str },
    #[error("content of {key} is not valid UTF-8")]
    Decode {
        key: String,
        #[source]
        source: std::str::Utf8Error,
    },
    #[error("failed to fetch cover image from {url}: {reason}")]
    Image { url: String, reason: String },
}

impl DomainError {
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Listing { .. } => "listing",
            DomainError::ObjectFetch { .. } => "object_fetch",
            DomainError::MetadataLookup { .. } => "metadata_lookup",
            DomainError::MetadataNotFound { .. } => "metadata_not_found",
            DomainError::MissingField { .. } => "missing_field",
            DomainError::Decode { .. } => "decode",
            DomainError::Image { .. } => "image",
        }
    }

    /// The error message followed by every source in its chain.
    pub fn describe(&self) -> String {
        let mut description = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            description.push_str(": ");
            description.push_str(&cause.to_string());
            source = cause.source();
        }
        description
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub exception: String,
    pub message: &'a str,
    pub kind: &'a str,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        let body = ErrorBody {
            exception: self.describe(),
            message: FAILURE_MESSAGE,
            kind: self.kind(),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_utf8() -> std::str::Utf8Error {
        let bytes = vec![0xc3, 0x28];
        std::str::from_utf8(&bytes).unwrap_err()
    }

    #[test]
    fn describe_includes_source_chain() {
        let err = DomainError::Decode {
            key: "post_A".into(),
            source: invalid_utf8(),
        };

        let description = err.describe();
        assert!(description.starts_with("content of post_A is not valid UTF-8: "));
        assert!(description.contains("invalid utf-8"));
    }

    #[test]
    fn every_kind_maps_to_internal_server_error() {
        let errors = [
            DomainError::Listing {
                bucket: "b".into(),
                reason: "timeout".into(),
            },
            DomainError::MetadataNotFound {
                table: "t".into(),
                key: "k".into(),
            },
            DomainError::MissingField {
                key: "k".into(),
                field: "author",
            },
            DomainError::Image {
                url: "http://localhost".into(),
                reason: "404".into(),
            },
        ];

        for err in errors {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[actix_web::test]
    async fn error_response_carries_exception_message_and_kind() {
        let err = DomainError::MetadataNotFound {
            table: "posts-meta".into(),
            key: "post_A".into(),
        };

        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "exception": "no metadata record for post_A in table posts-meta",
                "message": FAILURE_MESSAGE,
                "kind": "metadata_not_found"
            })
        );
    }
}
