use std::str::FromStr;

use actix_web::web::{self, Data, JsonConfig, PathConfig, ServiceConfig};
use actix_web::{App, HttpServer};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod campaign;
pub mod database;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod seed;
pub mod utils;

pub use campaign::{CampaignBody, CreateCampaignBody, UpdateCampaignBody};
pub use database::{Database, SqliteDatabase};
pub use envelope::Envelope;
pub use error::Error;

pub const DATABASE_URL: &str = "sqlite://database.db";
pub const BIND_ADDRESS: &str = "127.0.0.1:8080";
pub const API_ROOT: &str = "/api/v1";

/// Brings the store up to a ready state: creates the schema and, if there are
/// no campaigns yet, inserts the seed campaigns.
pub async fn initialize(pool: SqlitePool) -> Result<SqliteDatabase, Error> {
    let db = SqliteDatabase::initialize(pool).await?;
    seed::seed(&db).await?;

    info!("database initialized");

    Ok(db)
}

pub fn configure(db: Box<dyn Database>) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(JsonConfig::default().error_handler(|err, _req| {
            // format json errors with custom format
            Error::InvalidJson(err).into()
        }))
        .app_data(PathConfig::default().error_handler(|err, _req| {
            // format path errors with custom format
            Error::InvalidPath(err).into()
        }))
        .app_data(Data::new(db))
        .service(
            web::scope(API_ROOT)
                .service(handlers::root)
                .service(campaign::endpoints::get_campaigns)
                .service(campaign::endpoints::get_campaign_by_id)
                .service(campaign::endpoints::create_campaign)
                .service(campaign::endpoints::update_campaign)
                .service(campaign::endpoints::delete_campaign_by_id),
        )
        .default_service(web::to(handlers::path_does_not_exist));
    }
}

pub async fn run() -> Result<(), Error> {
    info!("connecting to db: {}", DATABASE_URL);
    let options = SqliteConnectOptions::from_str(DATABASE_URL)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    let db = initialize(pool).await?;

    info!("listening on {}", BIND_ADDRESS);
    let app_db = db.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .configure(configure(Box::new(app_db.clone())))
    })
    .bind(BIND_ADDRESS)?
    .run()
    .await?;

    db.close().await;

    Ok(())
}
