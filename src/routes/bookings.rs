use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    models::booking::{Endpoint, GuestField},
    routes::ApiError,
    services::{
        booking_widget::{BookingView, BookingWidget},
        step_sequencer::StepOutcome,
    },
    state::AppState,
};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CreateBookingInput {
    pub room_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PickerInput {
    #[serde(default)]
    pub endpoint: Endpoint,
}

#[derive(Debug, Deserialize)]
pub struct DateInput {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct GuestInput {
    pub field: GuestField,
    pub delta: i32,
}

#[derive(Serialize)]
struct SessionCreated {
    id: Uuid,
    view: BookingView,
}

#[derive(Serialize)]
struct DateResponse {
    accepted: bool,
    view: BookingView,
}

#[derive(Serialize)]
struct CountResponse {
    value: u32,
    view: BookingView,
}

#[derive(Serialize)]
struct StepResponse {
    #[serde(flatten)]
    outcome: StepOutcome,
    view: BookingView,
}

fn with_widget<R>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut BookingWidget) -> R,
) -> Result<R, ApiError> {
    let mut sessions = state
        .sessions
        .lock()
        .map_err(|_| ApiError::Internal("booking sessions lock poisoned".to_string()))?;
    let widget = sessions
        .get_mut(&id)
        .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))?;
    Ok(f(widget))
}

/*
    POST /api/bookings
    An empty body opens a session at the default rate.
*/
pub async fn create(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let input: CreateBookingInput = if body.iter().all(u8::is_ascii_whitespace) {
        CreateBookingInput::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?
    };

    let mut widget = state.new_widget();
    if let Some(room_id) = input.room_id {
        let room = state
            .catalog
            .get(&room_id)
            .cloned()
            .ok_or(ApiError::RoomNotFound(room_id))?;
        widget = widget.for_room(room);
    }

    let id = Uuid::new_v4();
    let view = widget.view();
    state
        .sessions
        .lock()
        .map_err(|_| ApiError::Internal("booking sessions lock poisoned".to_string()))?
        .insert(id, widget);
    log::info!("Booking session {} opened", id);

    Ok(HttpResponse::Created().json(SessionCreated { id, view }))
}

/*
    DELETE /api/bookings/{id}
*/
pub async fn remove(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    state
        .sessions
        .lock()
        .map_err(|_| ApiError::Internal("booking sessions lock poisoned".to_string()))?
        .remove(&id)
        .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))?;
    log::info!("Booking session {} closed", id);

    Ok(HttpResponse::NoContent().finish())
}

/*
    GET /api/bookings/{id}
*/
pub async fn get(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let view = with_widget(&state, path.into_inner(), |widget| widget.view())?;
    Ok(HttpResponse::Ok().json(view))
}

pub async fn open_picker(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    input: web::Json<PickerInput>,
) -> Result<HttpResponse, ApiError> {
    let view = with_widget(&state, path.into_inner(), |widget| {
        widget.open_picker(input.endpoint);
        widget.view()
    })?;
    Ok(HttpResponse::Ok().json(view))
}

pub async fn close_picker(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let view = with_widget(&state, path.into_inner(), |widget| {
        widget.close_picker();
        widget.view()
    })?;
    Ok(HttpResponse::Ok().json(view))
}

pub async fn next_month(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let view = with_widget(&state, path.into_inner(), |widget| {
        widget.next_month();
        widget.view()
    })?;
    Ok(HttpResponse::Ok().json(view))
}

pub async fn previous_month(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let view = with_widget(&state, path.into_inner(), |widget| {
        widget.previous_month();
        widget.view()
    })?;
    Ok(HttpResponse::Ok().json(view))
}

/*
    POST /api/bookings/{id}/dates
    A disabled date is answered with `accepted: false` and an unchanged view.
*/
pub async fn select_date(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    input: web::Json<DateInput>,
) -> Result<HttpResponse, ApiError> {
    let response = with_widget(&state, path.into_inner(), |widget| DateResponse {
        accepted: widget.select_date(input.date),
        view: widget.view(),
    })?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn change_count(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    input: web::Json<GuestInput>,
) -> Result<HttpResponse, ApiError> {
    let response = with_widget(&state, path.into_inner(), |widget| CountResponse {
        value: widget.change_count(input.field, input.delta),
        view: widget.view(),
    })?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn advance(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let response = with_widget(&state, path.into_inner(), |widget| StepResponse {
        outcome: widget.advance(),
        view: widget.view(),
    })?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn retreat(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let response = with_widget(&state, path.into_inner(), |widget| StepResponse {
        outcome: widget.retreat(),
        view: widget.view(),
    })?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn reset(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let view = with_widget(&state, path.into_inner(), |widget| {
        widget.reset();
        widget.view()
    })?;
    Ok(HttpResponse::Ok().json(view))
}
