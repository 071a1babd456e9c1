use std::sync::Arc;

use actix_web::{
    dev::Payload, http::StatusCode, web, Error, FromRequest, HttpRequest, HttpResponse,
    ResponseError,
};
use futures::future::{ready, Ready};

use crate::{models::room::RoomRecord, services::comparison_service::ComparisonProvider};

#[derive(Debug, Clone, PartialEq)]
pub enum ContextError {
    MissingProvider,
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextError::MissingProvider => write!(
                f,
                "Comparison context used without a ComparisonProvider registered on the app"
            ),
        }
    }
}

impl std::error::Error for ContextError {}

impl ResponseError for ContextError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": self.to_string() }))
    }
}

/// Handle on the comparison provider. The only way consumers reach a
/// visitor's comparison set.
#[derive(Clone)]
pub struct ComparisonContext {
    provider: Arc<ComparisonProvider>,
}

impl ComparisonContext {
    /// Fails instead of falling back to a fresh provider, so a missing
    /// registration shows up immediately.
    pub fn resolve(provider: Option<&Arc<ComparisonProvider>>) -> Result<Self, ContextError> {
        match provider {
            Some(provider) => Ok(Self {
                provider: provider.clone(),
            }),
            None => {
                log::error!("{}", ContextError::MissingProvider);
                Err(ContextError::MissingProvider)
            }
        }
    }

    pub fn max_rooms(&self) -> usize {
        self.provider.max_rooms()
    }

    pub fn add_room(&self, scope: &str, room: RoomRecord) -> bool {
        self.provider.add_room(scope, room)
    }

    pub fn remove_room(&self, scope: &str, room_id: &str) -> bool {
        self.provider.remove_room(scope, room_id)
    }

    pub fn is_comparing(&self, scope: &str, room_id: &str) -> bool {
        self.provider.is_comparing(scope, room_id)
    }

    pub fn clear_all(&self, scope: &str) -> bool {
        self.provider.clear_all(scope)
    }

    pub fn items(&self, scope: &str) -> Vec<RoomRecord> {
        self.provider.items(scope)
    }
}

impl FromRequest for ComparisonContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let provider = req
            .app_data::<web::Data<ComparisonProvider>>()
            .map(|data| data.clone().into_inner());
        ready(ComparisonContext::resolve(provider.as_ref()).map_err(Error::from))
    }
}
