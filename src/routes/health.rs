use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::env;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    environment: String,
    version: String,
    rooms: usize,
    nightly_rate: f64,
    tax_rate: f64,
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let rooms = state.catalog.rooms().len();

    let health = HealthStatus {
        // An empty catalog still serves generic quotes, but nothing can be compared.
        status: if rooms == 0 { "degraded" } else { "ok" }.to_string(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rooms,
        nightly_rate: state.config.nightly_rate,
        tax_rate: state.config.tax_rate,
    };

    HttpResponse::Ok().json(health)
}
