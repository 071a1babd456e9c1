#![allow(dead_code)]

use actix_web::{web, App};
use chrono::NaiveDate;
use std::sync::Arc;

use aurelia_booking::{
    config::BookingConfig,
    routes,
    services::{
        calendar_service::FixedClock, catalog_service::RoomCatalog,
        comparison_service::ComparisonProvider,
        submission::{BookingSubmitter, LoggingSubmitter},
    },
    state::AppState,
};

pub struct TestApp {
    pub state: web::Data<AppState>,
    pub provider: web::Data<ComparisonProvider>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_submitter(Arc::new(LoggingSubmitter))
    }

    pub fn with_submitter(submitter: Arc<dyn BookingSubmitter>) -> Self {
        let config = BookingConfig::default();
        let provider = web::Data::new(ComparisonProvider::new(config.max_compare_rooms));
        let state = web::Data::new(AppState::with_parts(
            config,
            RoomCatalog::bundled().expect("bundled catalog"),
            Arc::new(FixedClock(today())),
            submitter,
        ));

        Self { state, provider }
    }

    pub fn session_count(&self) -> usize {
        self.state.sessions.lock().unwrap().len()
    }

    pub fn create_app(&self) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .app_data(self.provider.clone())
            .configure(routes::configure)
    }

    /// Same routes, but nobody registered a comparison provider.
    pub fn create_app_without_provider(&self) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .configure(routes::configure)
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}
