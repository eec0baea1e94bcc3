//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for bookings and reviews
//! - Authentication middleware and the `AuthUser` extractor
//! - The JSON error envelope every failure is rendered into

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use roomify_core::booking::BookingLedger;
use roomify_core::clock::Clock;
use roomify_core::review::ReviewGate;
use roomify_db::{BookingRepository, PropertyRepository, ReviewRepository};
use roomify_shared::JwtService;

/// Booking service wired to the database.
pub type Bookings = BookingLedger<BookingRepository, PropertyRepository>;

/// Review service wired to the database.
pub type Reviews = ReviewGate<ReviewRepository, BookingRepository, PropertyRepository>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Booking lifecycle service.
    pub bookings: Arc<Bookings>,
    /// Review service.
    pub reviews: Arc<Reviews>,
}

impl AppState {
    /// Wires repositories and services over one connection pool.
    #[must_use]
    pub fn new(db: DatabaseConnection, jwt_service: JwtService) -> Self {
        let properties = Arc::new(PropertyRepository::new(db.clone()));
        let bookings = Arc::new(BookingLedger::new(
            Arc::new(BookingRepository::new(db.clone())),
            Arc::clone(&properties),
        ));
        Self::assemble(db, jwt_service, properties, bookings)
    }

    /// Like [`AppState::new`] with an explicit source of "today".
    #[must_use]
    pub fn with_clock(
        db: DatabaseConnection,
        jwt_service: JwtService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let properties = Arc::new(PropertyRepository::new(db.clone()));
        let bookings = Arc::new(BookingLedger::with_clock(
            Arc::new(BookingRepository::new(db.clone())),
            Arc::clone(&properties),
            clock,
        ));
        Self::assemble(db, jwt_service, properties, bookings)
    }

    fn assemble(
        db: DatabaseConnection,
        jwt_service: JwtService,
        properties: Arc<PropertyRepository>,
        bookings: Arc<Bookings>,
    ) -> Self {
        let reviews = Arc::new(ReviewGate::new(
            Arc::new(ReviewRepository::new(db.clone())),
            Arc::clone(&bookings),
            properties,
        ));
        Self {
            db: Arc::new(db),
            jwt_service: Arc::new(jwt_service),
            bookings,
            reviews,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests;
