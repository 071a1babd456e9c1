use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use uuid::Uuid;

use crate::{
    config::BookingConfig,
    services::{
        booking_widget::BookingWidget,
        calendar_service::{Clock, SystemClock},
        catalog_service::RoomCatalog,
        submission::{BookingSubmitter, LoggingSubmitter},
    },
};

pub struct AppState {
    pub config: BookingConfig,
    pub catalog: RoomCatalog,
    pub clock: Arc<dyn Clock>,
    pub submitter: Arc<dyn BookingSubmitter>,
    pub sessions: Mutex<HashMap<Uuid, BookingWidget>>,
}

impl AppState {
    pub fn new(config: BookingConfig, catalog: RoomCatalog) -> Self {
        Self::with_parts(config, catalog, Arc::new(SystemClock), Arc::new(LoggingSubmitter))
    }

    pub fn with_parts(
        config: BookingConfig,
        catalog: RoomCatalog,
        clock: Arc<dyn Clock>,
        submitter: Arc<dyn BookingSubmitter>,
    ) -> Self {
        Self {
            config,
            catalog,
            clock,
            submitter,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn new_widget(&self) -> BookingWidget {
        BookingWidget::new(&self.config, self.clock.clone(), self.submitter.clone())
    }
}
