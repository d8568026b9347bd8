use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use anyhow::{Context, Result};
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod models;
pub mod routes;
pub mod schema;
pub mod upload;

use config::Config;
use db::DbPool;

/// The routing table, shared by the server and the tests.
pub fn app(
    config: Config,
    pool: DbPool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(Data::new(config))
        .app_data(Data::new(pool))
        .wrap(Logger::default())
        .service(routes::index)
        .service(routes::admin::dashboard)
        .service(routes::admin::publish_form)
        .service(routes::admin::publish)
        .service(routes::user::listing)
        .service(routes::article::get_article)
        .service(routes::article::comment_article)
}

pub async fn run() -> Result<()> {
    let config = Config::from_env()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let upload_dir = config.upload_dir();
    upload::ensure_upload_dir(&upload_dir).with_context(|| {
        format!("Failed to create upload directory {}", upload_dir.display())
    })?;
    let pool = db::create_connection_pool(&config)?;
    db::init_schema(&pool)?;

    log::info!(
        "serving {} on {} (uploads in {})",
        config.database_url,
        config.bind_address,
        upload_dir.display()
    );
    let bind_address = config.bind_address.clone();
    HttpServer::new(move || app(config.clone(), pool.clone()))
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;
    Ok(())
}
