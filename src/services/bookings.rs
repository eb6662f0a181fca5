//! The booking lifecycle: create, admin action, list, get, delete.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{AdminActionRequest, Booking, CreateBookingRequest};
use crate::services::notification;
use crate::services::validation::{validate_admin_action, validate_new_booking};
use crate::state::AppState;

pub fn create_booking(state: &AppState, req: &CreateBookingRequest) -> Result<Booking, AppError> {
    let new_booking = validate_new_booking(req)?;
    let booking = new_booking.into_booking(Uuid::new_v4().to_string(), Utc::now());

    {
        let db = state.conn()?;
        queries::insert_booking(&db, &booking)?;
    }

    tracing::info!(booking_id = %booking.id, "booking created");
    Ok(booking)
}

/// Confirms or cancels a booking, then notifies the customer if a notifier is set.
pub fn apply_admin_action(
    state: &AppState,
    id: &str,
    req: &AdminActionRequest,
) -> Result<Booking, AppError> {
    let decision = validate_admin_action(req)?;
    let action = decision.into_admin_action(Utc::now());

    let updated = {
        let db = state.conn()?;
        queries::apply_admin_action(&db, id, &action)?
    };
    let booking = updated.ok_or_else(|| AppError::NotFound(id.to_string()))?;

    tracing::info!(booking_id = %booking.id, action = action.action.as_str(), "admin action applied");

    if let Some(notifier) = &state.notifier {
        notification::dispatch(Arc::clone(notifier), &booking);
    }

    Ok(booking)
}

pub fn list_bookings(state: &AppState) -> Result<Vec<Booking>, AppError> {
    let db = state.conn()?;
    Ok(queries::list_bookings(&db)?)
}

pub fn get_booking(state: &AppState, id: &str) -> Result<Booking, AppError> {
    let db = state.conn()?;
    queries::get_booking_by_id(&db, id)?.ok_or_else(|| AppError::NotFound(id.to_string()))
}

pub fn delete_booking(state: &AppState, id: &str) -> Result<Booking, AppError> {
    let removed = {
        let db = state.conn()?;
        queries::delete_booking(&db, id)?
    };
    let booking = removed.ok_or_else(|| AppError::NotFound(id.to_string()))?;

    tracing::info!(booking_id = %booking.id, "booking deleted");
    Ok(booking)
}
