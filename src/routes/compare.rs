use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::{
    middleware::comparison_context::ComparisonContext, models::room::RoomRecord,
    routes::ApiError, state::AppState,
};

#[derive(Serialize)]
struct ComparisonTray {
    items: Vec<RoomRecord>,
    max_rooms: usize,
    full: bool,
}

#[derive(Serialize)]
struct ComparisonChange {
    changed: bool,
    #[serde(flatten)]
    tray: ComparisonTray,
}

fn tray(context: &ComparisonContext, visitor: &str) -> ComparisonTray {
    let items = context.items(visitor);
    ComparisonTray {
        full: items.len() >= context.max_rooms(),
        max_rooms: context.max_rooms(),
        items,
    }
}

/*
    GET /api/compare/{visitor}
*/
pub async fn get_items(context: ComparisonContext, path: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(tray(&context, &path.into_inner()))
}

/*
    POST /api/compare/{visitor}/rooms/{room_id}
    Adding to a full tray or re-adding a room answers `changed: false`.
*/
pub async fn add_room(
    context: ComparisonContext,
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (visitor, room_id) = path.into_inner();
    let room = state
        .catalog
        .get(&room_id)
        .cloned()
        .ok_or(ApiError::RoomNotFound(room_id))?;

    let changed = context.add_room(&visitor, room);
    Ok(HttpResponse::Ok().json(ComparisonChange {
        changed,
        tray: tray(&context, &visitor),
    }))
}

/*
    DELETE /api/compare/{visitor}/rooms/{room_id}
*/
pub async fn remove_room(
    context: ComparisonContext,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (visitor, room_id) = path.into_inner();
    let changed = context.remove_room(&visitor, &room_id);
    HttpResponse::Ok().json(ComparisonChange {
        changed,
        tray: tray(&context, &visitor),
    })
}

/*
    DELETE /api/compare/{visitor}
*/
pub async fn clear_all(context: ComparisonContext, path: web::Path<String>) -> HttpResponse {
    let visitor = path.into_inner();
    context.clear_all(&visitor);
    HttpResponse::Ok().json(tray(&context, &visitor))
}
