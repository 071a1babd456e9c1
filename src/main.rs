use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use aurelia_booking::{
    config::BookingConfig, models::room::RoomRecord, routes, services::catalog_service::RoomCatalog,
    services::comparison_service::ComparisonProvider, state::AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = BookingConfig::from_env();
    let catalog = RoomCatalog::bundled()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string()))?;
    log::info!(
        "Loaded {} rooms; default rate {:.2}/night, tax {:.2}%",
        catalog.rooms().len(),
        config.nightly_rate,
        config.tax_rate * 100.0
    );

    let (host, port) = (config.host.clone(), config.port);
    let provider = web::Data::new(ComparisonProvider::new(config.max_compare_rooms));
    provider.subscribe(std::sync::Arc::new(|visitor: &str, items: &[RoomRecord]| {
        log::debug!("Comparison for {} now holds {} room(s)", visitor, items.len());
    }));
    let state = web::Data::new(AppState::new(config, catalog));

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(provider.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
