use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{error, info};

use crate::application::post_service::PostService;
use crate::data::cover_source::CoverSource;
use crate::data::metadata_store::MetadataStore;
use crate::data::object_store::ObjectStore;
use crate::domain::error::DomainError;
use crate::infrastructure::config::AppConfig;
use crate::presentation::middleware::RequestId;

pub fn configure<O, M, C>(cfg: &mut web::ServiceConfig)
where
    O: ObjectStore + 'static,
    M: MetadataStore + 'static,
    C: CoverSource + 'static,
{
    cfg.route("/posts", web::get().to(get_posts::<O, M, C>));
}

/// Lists every post in the configured bucket. Query parameters are ignored.
async fn get_posts<O, M, C>(
    req: HttpRequest,
    service: web::Data<PostService<O, M, C>>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, DomainError>
where
    O: ObjectStore + 'static,
    M: MetadataStore + 'static,
    C: CoverSource + 'static,
{
    let request_id = RequestId::of(&req);

    let posts = service
        .aggregate(&config.bucket_posts, &config.table_posts)
        .await
        .map_err(|e| {
            error!(
                request_id = %request_id,
                kind = e.kind(),
                error = %e.describe(),
                "failed to aggregate posts"
            );
            e
        })?;

    info!(
        request_id = %request_id,
        total = posts.len(),
        "posts retrieved"
    );

    Ok(HttpResponse::Ok().json(posts))
}
