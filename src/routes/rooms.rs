use actix_web::{web, HttpResponse};

use crate::{routes::ApiError, state::AppState};

/*
    /api/rooms
*/
pub async fn get_rooms(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.catalog.rooms())
}

/*
    /api/rooms/{id}
*/
pub async fn get_room(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let room = state.catalog.get(&id).ok_or(ApiError::RoomNotFound(id))?;
    Ok(HttpResponse::Ok().json(room))
}
