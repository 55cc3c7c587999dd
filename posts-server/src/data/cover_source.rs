use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::post::CoverImage;

#[async_trait]
pub trait CoverSource: Send + Sync {
    async fn fetch_cover(&self) -> Result<CoverImage, DomainError>;
}

/// Placeholder covers served from a fixed URL.
#[derive(Clone)]
pub struct HttpCoverSource {
    client: Client,
    url: String,
}

impl HttpCoverSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    fn failure(&self, reason: impl ToString) -> DomainError {
        let reason = reason.to_string();
        debug!(url = %self.url, "failed to fetch cover image: {}", reason);
        DomainError::Image {
            url: self.url.clone(),
            reason,
        }
    }
}

#[async_trait]
impl CoverSource for HttpCoverSource {
    async fn fetch_cover(&self) -> Result<CoverImage, DomainError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.failure(e))?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .ok_or_else(|| self.failure("response has no content type"))?;

        let bytes = response.bytes().await.map_err(|e| self.failure(e))?;

        Ok(CoverImage::new(content_type, bytes.to_vec()))
    }
}
