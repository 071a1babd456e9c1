use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};

pub mod bookings;
pub mod compare;
pub mod health;
pub mod rooms;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    SessionNotFound(String),
    RoomNotFound(String),
    Internal(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(err) => write!(f, "Invalid request body: {}", err),
            ApiError::SessionNotFound(id) => write!(f, "Booking session {} not found", id),
            ApiError::RoomNotFound(id) => write!(f, "Room {} not found", id),
            ApiError::Internal(err) => write!(f, "Internal error: {}", err),
        }
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::SessionNotFound(_) | ApiError::RoomNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(err) = self {
            log::error!("Request failed: {}", err);
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": self.to_string() }))
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api")
            .service(
                web::scope("/rooms")
                    .route("", web::get().to(rooms::get_rooms))
                    .route("/{id}", web::get().to(rooms::get_room)),
            )
            .service(
                web::scope("/bookings")
                    .route("", web::post().to(bookings::create))
                    .route("/{id}", web::get().to(bookings::get))
                    .route("/{id}", web::delete().to(bookings::remove))
                    .route("/{id}/picker", web::post().to(bookings::open_picker))
                    .route("/{id}/picker", web::delete().to(bookings::close_picker))
                    .route("/{id}/calendar/next", web::post().to(bookings::next_month))
                    .route("/{id}/calendar/previous", web::post().to(bookings::previous_month))
                    .route("/{id}/dates", web::post().to(bookings::select_date))
                    .route("/{id}/guests", web::post().to(bookings::change_count))
                    .route("/{id}/advance", web::post().to(bookings::advance))
                    .route("/{id}/retreat", web::post().to(bookings::retreat))
                    .route("/{id}/reset", web::post().to(bookings::reset)),
            )
            .service(
                web::scope("/compare/{visitor}")
                    .route("", web::get().to(compare::get_items))
                    .route("", web::delete().to(compare::clear_all))
                    .route("/rooms/{room_id}", web::post().to(compare::add_room))
                    .route("/rooms/{room_id}", web::delete().to(compare::remove_room)),
            ),
    );
}
