use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::info;

use crate::infrastructure::config::AppConfig;

pub async fn load_sdk_config(config: &AppConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &config.aws_region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &config.aws_endpoint_url {
        info!(endpoint = %endpoint, "using custom AWS endpoint");
        loader = loader.endpoint_url(endpoint);
    }
    loader.load().await
}

/// Custom endpoints (LocalStack, MinIO) only resolve path-style bucket URLs.
pub fn s3_client(sdk_config: &SdkConfig, config: &AppConfig) -> aws_sdk_s3::Client {
    let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
        .force_path_style(config.aws_endpoint_url.is_some())
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}

pub fn dynamodb_client(sdk_config: &SdkConfig) -> aws_sdk_dynamodb::Client {
    aws_sdk_dynamodb::Client::new(sdk_config)
}
