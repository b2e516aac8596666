use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use vehicle_service_be::config::AppConfig;
use vehicle_service_be::routes::{self, AppState};
use vehicle_service_be::store::PgServiceStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to load configuration: {err}");
            std::process::exit(1);
        }
    };

    let store = match PgServiceStore::connect(&config.database_url, config.db_max_connections).await
    {
        Ok(store) => {
            info!("Connection to the database is successful");
            store
        }
        Err(err) => {
            error!("Failed to connect to the database: {err:?}");
            std::process::exit(1);
        }
    };

    let state = web::Data::new(AppState::new(Arc::new(store), config.error_detail()));

    info!(
        "Vehicle service API listening on http://{}:{}/api",
        config.http_host, config.http_port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_header()
                    .allow_any_method()
                    .supports_credentials(),
            )
            .wrap(Logger::default())
            .wrap(routes::error_handlers())
            .configure(routes::configure)
            .default_service(web::route().to(routes::route_not_found))
    })
    .bind((config.http_host.as_str(), config.http_port))?
    .run()
    .await
}
