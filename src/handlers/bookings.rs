use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::errors::{AppError, ValidationErrors};
use crate::models::{AdminActionRequest, Booking, CreateBookingRequest};
use crate::services::bookings;
use crate::state::AppState;

#[derive(Serialize)]
pub struct BookingEnvelope {
    message: String,
    booking: Booking,
}

#[derive(Serialize)]
pub struct BookingListEnvelope {
    message: String,
    bookings: Vec<Booking>,
}

fn envelope(message: impl Into<String>, booking: Booking) -> Json<BookingEnvelope> {
    Json(BookingEnvelope {
        message: message.into(),
        booking,
    })
}

/// Malformed bodies are client errors like any other validation failure.
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Validation(ValidationErrors::new(rejection.body_text(), vec![])))
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingEnvelope>), AppError> {
    let req = parse_body(payload)?;
    let booking = bookings::create_booking(&state, &req)?;
    Ok((StatusCode::CREATED, envelope("Booking created", booking)))
}

// PUT /api/bookings/:id/action
pub async fn admin_action(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<AdminActionRequest>, JsonRejection>,
) -> Result<Json<BookingEnvelope>, AppError> {
    let req = parse_body(payload)?;
    let booking = bookings::apply_admin_action(&state, &id, &req)?;
    let message = format!("Booking {}", booking.status.as_str());
    Ok(envelope(message, booking))
}

// GET /api/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BookingListEnvelope>, AppError> {
    let bookings = bookings::list_bookings(&state)?;
    Ok(Json(BookingListEnvelope {
        message: "All bookings retrieved".to_string(),
        bookings,
    }))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BookingEnvelope>, AppError> {
    let booking = bookings::get_booking(&state, &id)?;
    Ok(envelope("Booking retrieved", booking))
}

// DELETE /api/bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BookingEnvelope>, AppError> {
    let booking = bookings::delete_booking(&state, &id)?;
    Ok(envelope("Booking deleted successfully", booking))
}
