use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::application::post_service::PostService;
use crate::data::cover_source::CoverSource;
use crate::data::metadata_store::MetadataStore;
use crate::data::object_store::ObjectStore;
use crate::infrastructure::config::AppConfig;
use crate::presentation::handlers;
use crate::presentation::middleware::RequestContext;

pub async fn start_rest_server<O, M, C>(
    config: AppConfig,
    post_service: PostService<O, M, C>,
) -> anyhow::Result<()>
where
    O: ObjectStore + 'static,
    M: MetadataStore + 'static,
    C: CoverSource + 'static,
{
    let bind_address = (config.host.clone(), config.port);
    info!(host = %bind_address.0, port = bind_address.1, "HTTP server starting");

    let config = web::Data::new(config);
    let post_service = web::Data::new(post_service);

    HttpServer::new(move || {
        let cors = build_cors(&config);

        App::new()
            .wrap(Logger::default())
            .wrap(RequestContext)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .app_data(post_service.clone())
            .app_data(config.clone())
            .service(
                web::scope("/api")
                    .service(handlers::health::health)
                    .configure(handlers::post::configure::<O, M, C>),
            )
    })
    .bind(bind_address)?
    .run()
    .await
    .map_err(anyhow::Error::new)?;

    Ok(())
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET"])
        .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
        .max_age(3600);

    for origin in &config.cors_origins {
        cors = if origin == "*" {
            cors.allow_any_origin()
        } else {
            cors.allowed_origin(origin)
        };
    }

    cors
}
