mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use std::sync::Arc;

use application::post_service::PostService;
use data::cover_source::HttpCoverSource;
use data::metadata_store::DynamoMetadataStore;
use data::object_store::S3ObjectStore;
use infrastructure::aws::{dynamodb_client, load_sdk_config, s3_client};
use infrastructure::config::AppConfig;
use infrastructure::logging::init_logging;
use reqwest::Client;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;
    info!(
        bucket = %config.bucket_posts,
        table = %config.table_posts,
        "configuration loaded"
    );

    let sdk_config = load_sdk_config(&config).await;
    let objects = Arc::new(S3ObjectStore::new(s3_client(&sdk_config, &config)));
    let metadata = Arc::new(DynamoMetadataStore::new(dynamodb_client(&sdk_config)));
    let covers = Arc::new(HttpCoverSource::new(Client::new(), config.cover_url.clone()));

    let post_service = PostService::new(objects, metadata, covers);

    server::start_rest_server(config, post_service).await
}
