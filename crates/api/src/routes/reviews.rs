//! Review routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use roomify_core::review::{CreateReviewInput, UpdateReviewInput};
use roomify_shared::types::{PropertyId, ReviewId, UserId};

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the review routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", post(create_review))
        .route(
            "/reviews/{review_id}",
            get(get_review).patch(update_review).delete(remove_review),
        )
        .route("/properties/{property_id}/reviews", get(list_property_reviews))
        .route("/properties/{property_id}/rating", get(property_rating))
        .route("/users/{user_id}/reviews", get(list_user_reviews))
}

/// Request body for creating a review.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    /// Property being reviewed.
    pub property_id: Uuid,
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Review text.
    pub comment: String,
}

/// Request body for editing a review.
#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    /// New rating.
    pub rating: Option<u8>,
    /// New text.
    pub comment: Option<String>,
}

/// POST /reviews
async fn create_review(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(req): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateReviewInput {
        property_id: PropertyId::from(req.property_id),
        rating: req.rating,
        comment: req.comment,
    };

    let review = state.reviews.create_review(input, &principal).await?;

    info!(
        review_id = %review.id,
        property_id = %review.property_id,
        reviewer_id = %review.reviewer_id,
        rating = review.rating,
        "Review created"
    );

    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /reviews/{review_id}
async fn get_review(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(review_id): Path<ReviewId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.reviews.get_review(review_id).await?))
}

/// PATCH /reviews/{review_id}
async fn update_review(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(review_id): Path<ReviewId>,
    Json(req): Json<UpdateReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = UpdateReviewInput {
        rating: req.rating,
        comment: req.comment,
    };
    let review = state
        .reviews
        .update_review(review_id, patch, &principal)
        .await?;

    info!(review_id = %review.id, rating = review.rating, "Review updated");

    Ok(Json(review))
}

/// DELETE /reviews/{review_id}
async fn remove_review(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(review_id): Path<ReviewId>,
) -> Result<impl IntoResponse, ApiError> {
    state.reviews.remove_review(review_id, &principal).await?;

    info!(review_id = %review_id, removed_by = %principal.id, "Review deleted");

    Ok(Json(json!({ "message": "Review deleted" })))
}

/// GET /properties/{property_id}/reviews
async fn list_property_reviews(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(property_id): Path<PropertyId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.reviews.list_reviews(property_id).await?))
}

/// GET /properties/{property_id}/rating
async fn property_rating(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(property_id): Path<PropertyId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.reviews.property_rating(property_id).await?))
}

/// GET /users/{user_id}/reviews
async fn list_user_reviews(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.reviews.list_reviews_by_user(user_id).await?))
}
