use axum::extract::{Query, State};
use hyper::StatusCode;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::domain::{
    LoggedUser, NewReview, Rating, Review, ReviewComment, ReviewPayload, ReviewTarget, Role,
    SearchQuery,
};
use crate::error::ApiError;
use crate::extract::{Json, Path};

#[derive(serde::Serialize)]
pub struct CreatedReview {
    pub id: Uuid,
}

#[derive(serde::Deserialize)]
pub struct ReviewUpdate {
    pub rating: Option<i16>,
    pub comment: Option<String>,
}

#[tracing::instrument(
    name = "Creating a new review",
    skip(app_state, user, payload),
    fields(reviewer_username = %user.username)
)]
pub async fn create_review(
    State(app_state): State<AppState>,
    user: LoggedUser,
    Json(payload): Json<ReviewPayload>,
) -> Result<(StatusCode, Json<CreatedReview>), ApiError> {
    if user.role != Role::Guest {
        return Err(ApiError::Forbidden("Only guest can leave review".to_string()));
    }
    let new_review = NewReview::parse(payload, user.username).map_err(ApiError::BadRequest)?;

    let allowed = match &new_review.target {
        ReviewTarget::Accommodation { entity_id } => {
            app_state
                .reservations_client
                .check_accommodation_review(entity_id, &new_review.reviewer_username)
                .await?
        }
        ReviewTarget::Host { host_username } => {
            app_state
                .reservations_client
                .check_host_review(host_username, &new_review.reviewer_username)
                .await?
        }
    };
    if !allowed {
        return Err(ApiError::Forbidden(format!(
            "User does not have permission to leave review for this {}",
            new_review.kind().as_str().to_lowercase()
        )));
    }

    let id = app_state.repository.insert(&new_review).await?;
    Ok((StatusCode::CREATED, Json(CreatedReview { id })))
}

#[tracing::instrument(name = "Getting review", skip(app_state))]
pub async fn get_review(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Review>, ApiError> {
    app_state
        .repository
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Review not found".to_string()))
}

#[tracing::instrument(
    name = "Listing reviews by reviewer",
    skip(app_state, user, query),
    fields(reviewer_username = %user.username)
)]
pub async fn list_reviews(
    State(app_state): State<AppState>,
    user: LoggedUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let query = query.sanitized();
    let reviews = app_state
        .repository
        .by_reviewer(&user.username, &query)
        .await?;
    Ok(Json(reviews))
}

#[tracing::instrument(name = "Listing reviews by accommodation", skip(app_state))]
pub async fn accommodation_reviews(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = app_state.repository.by_accommodation(&id).await?;
    Ok(Json(reviews))
}

#[tracing::instrument(name = "Listing reviews by host", skip(app_state))]
pub async fn host_reviews(
    State(app_state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = app_state.repository.by_host(&username).await?;
    Ok(Json(reviews))
}

#[tracing::instrument(
    name = "Updating review",
    skip(app_state, user, update),
    fields(reviewer_username = %user.username)
)]
pub async fn update_review(
    State(app_state): State<AppState>,
    user: LoggedUser,
    Path(id): Path<Uuid>,
    Json(update): Json<ReviewUpdate>,
) -> Result<Json<bool>, ApiError> {
    if user.role != Role::Guest {
        return Err(ApiError::Forbidden("Only guest can update review".to_string()));
    }
    let review = authored_review(&app_state, id, &user.username, "update").await?;

    let rating = update
        .rating
        .map(Rating::parse)
        .transpose()
        .map_err(ApiError::BadRequest)?;
    let comment = update
        .comment
        .map(ReviewComment::parse)
        .transpose()
        .map_err(ApiError::BadRequest)?;
    let updated = app_state
        .repository
        .update(review.id, rating, comment.as_ref().map(AsRef::as_ref))
        .await?;
    Ok(Json(updated))
}

#[tracing::instrument(
    name = "Deleting review",
    skip(app_state, user),
    fields(reviewer_username = %user.username)
)]
pub async fn delete_review(
    State(app_state): State<AppState>,
    user: LoggedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if user.role != Role::Guest {
        return Err(ApiError::Forbidden("Only guest can delete review".to_string()));
    }
    let review = authored_review(&app_state, id, &user.username, "delete").await?;
    app_state.repository.delete(review.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Loads the review and enforces that only its author may touch it.
async fn authored_review(
    app_state: &AppState,
    id: Uuid,
    username: &str,
    action: &str,
) -> Result<Review, ApiError> {
    let review = app_state
        .repository
        .get(id)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Review not found".to_string()))?;
    if review.reviewer_username != username {
        return Err(ApiError::Forbidden(format!(
            "User does not have permission to {} review",
            action
        )));
    }
    Ok(review)
}
