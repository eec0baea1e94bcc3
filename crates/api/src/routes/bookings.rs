//! Booking routes.
//!
//! Handlers translate JSON into typed ledger requests and pass the caller's
//! principal along; every rule lives in the ledger.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use roomify_core::booking::{CreateBookingInput, UpdateBookingInput};
use roomify_shared::types::{BookingId, PropertyId};

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the booking routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route(
            "/bookings/{booking_id}",
            get(get_booking).patch(update_booking).delete(remove_booking),
        )
        .route("/bookings/{booking_id}/confirm", post(confirm_booking))
        .route("/bookings/{booking_id}/cancel", post(cancel_booking))
        .route("/bookings/{booking_id}/complete", post(complete_booking))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating a booking.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    /// Property to book.
    pub property_id: Uuid,
    /// First night (YYYY-MM-DD).
    pub check_in_date: NaiveDate,
    /// Departure day (YYYY-MM-DD).
    pub check_out_date: NaiveDate,
    /// Number of guests.
    pub guest_count: u32,
    /// Optional note for the host.
    pub special_requests: Option<String>,
}

/// Request body for updating a booking.
///
/// Unknown fields are rejected, so a `status` here is refused rather than
/// silently ignored; status only moves through the action routes.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateBookingRequest {
    /// New first night.
    pub check_in_date: Option<NaiveDate>,
    /// New departure day.
    pub check_out_date: Option<NaiveDate>,
    /// New guest count.
    pub guest_count: Option<u32>,
    /// New note; `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub special_requests: Option<Option<String>>,
}

/// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateBookingRequest> for UpdateBookingInput {
    fn from(req: UpdateBookingRequest) -> Self {
        Self {
            check_in_date: req.check_in_date,
            check_out_date: req.check_out_date,
            guest_count: req.guest_count,
            special_requests: req.special_requests,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /bookings
async fn create_booking(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateBookingInput {
        property_id: PropertyId::from(req.property_id),
        check_in_date: req.check_in_date,
        check_out_date: req.check_out_date,
        guest_count: req.guest_count,
        special_requests: req.special_requests,
    };

    let booking = state.bookings.create_booking(input, &principal).await?;

    info!(
        booking_id = %booking.id,
        property_id = %booking.property_id,
        guest_id = %booking.guest_id,
        total_price = %booking.total_price,
        "Booking created"
    );

    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /bookings
async fn list_bookings(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let bookings = state.bookings.list_bookings(&principal).await?;
    Ok(Json(bookings))
}

/// GET /bookings/{booking_id}
async fn get_booking(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(booking_id): Path<BookingId>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = state.bookings.get_booking(booking_id, &principal).await?;
    Ok(Json(booking))
}

/// PATCH /bookings/{booking_id}
async fn update_booking(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(booking_id): Path<BookingId>,
    Json(req): Json<UpdateBookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = state
        .bookings
        .update_booking(booking_id, req.into(), &principal)
        .await?;

    info!(
        booking_id = %booking.id,
        property_id = %booking.property_id,
        total_price = %booking.total_price,
        "Booking updated"
    );

    Ok(Json(booking))
}

/// POST /bookings/{booking_id}/confirm
async fn confirm_booking(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(booking_id): Path<BookingId>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = state.bookings.confirm_booking(booking_id, &principal).await?;
    log_status_change(&booking);
    Ok(Json(booking))
}

/// POST /bookings/{booking_id}/cancel
async fn cancel_booking(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(booking_id): Path<BookingId>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = state.bookings.cancel_booking(booking_id, &principal).await?;
    log_status_change(&booking);
    Ok(Json(booking))
}

/// POST /bookings/{booking_id}/complete
async fn complete_booking(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(booking_id): Path<BookingId>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = state
        .bookings
        .complete_booking(booking_id, &principal)
        .await?;
    log_status_change(&booking);
    Ok(Json(booking))
}

/// DELETE /bookings/{booking_id}
async fn remove_booking(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(booking_id): Path<BookingId>,
) -> Result<impl IntoResponse, ApiError> {
    state.bookings.remove_booking(booking_id, &principal).await?;

    info!(booking_id = %booking_id, removed_by = %principal.id, "Booking deleted");

    Ok(Json(json!({ "message": "Booking deleted" })))
}

fn log_status_change(booking: &roomify_core::booking::Booking) {
    info!(
        booking_id = %booking.id,
        property_id = %booking.property_id,
        status = %booking.status,
        "Booking status changed"
    );
}
