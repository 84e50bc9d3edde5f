use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{NewReview, Rating, Review, ReviewKind, ReviewTarget, SearchQuery};
use crate::error::ApiError;

const REVIEW_COLUMNS: &str =
    "id, kind, entity_id, host_username, comment, rating, reviewer_username, created_at";

#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    kind: String,
    entity_id: Option<String>,
    host_username: Option<String>,
    comment: Option<String>,
    rating: i16,
    reviewer_username: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = String;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Review {
            id: row.id,
            kind: row.kind.parse::<ReviewKind>()?,
            entity_id: row.entity_id,
            host_username: row.host_username,
            comment: row.comment,
            rating: row.rating,
            reviewer_username: row.reviewer_username,
            created_at: row.created_at,
        })
    }
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(name = "Fetching review by id", skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Review>, ApiError> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;
        row.map(Review::try_from)
            .transpose()
            .map_err(ApiError::Internal)
    }

    #[tracing::instrument(name = "Saving new review", skip(self, new_review))]
    pub async fn insert(&self, new_review: &NewReview) -> Result<Uuid, ApiError> {
        let id = Uuid::new_v4();
        let (entity_id, host_username) = match &new_review.target {
            ReviewTarget::Accommodation { entity_id } => (Some(entity_id.as_str()), None),
            ReviewTarget::Host { host_username } => (None, Some(host_username.as_str())),
        };
        sqlx::query(
            "INSERT INTO reviews (id, kind, entity_id, host_username, comment, rating, reviewer_username, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(id)
        .bind(new_review.kind().as_str())
        .bind(entity_id)
        .bind(host_username)
        .bind(new_review.comment.as_ref().map(AsRef::as_ref))
        .bind(new_review.rating.as_i16())
        .bind(&new_review.reviewer_username)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map(|_| {
            tracing::info!("New review {} saved", id);
            id
        })
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e.into()
        })
    }

    #[tracing::instrument(name = "Fetching reviews by reviewer", skip(self))]
    pub async fn by_reviewer(
        &self,
        reviewer_username: &str,
        query: &SearchQuery,
    ) -> Result<Vec<Review>, ApiError> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews \
             WHERE reviewer_username = $1 \
             AND ($2::text IS NULL OR entity_id = $2) \
             AND ($3::text IS NULL OR host_username = $3) \
             ORDER BY created_at DESC"
        ))
        .bind(reviewer_username)
        .bind(query.entity_id.as_deref())
        .bind(query.host_username.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;
        collect(rows)
    }

    #[tracing::instrument(name = "Fetching reviews by accommodation", skip(self))]
    pub async fn by_accommodation(&self, entity_id: &str) -> Result<Vec<Review>, ApiError> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews \
             WHERE kind = 'Accommodation' AND entity_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;
        collect(rows)
    }

    #[tracing::instrument(name = "Fetching reviews by host", skip(self))]
    pub async fn by_host(&self, host_username: &str) -> Result<Vec<Review>, ApiError> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews \
             WHERE kind = 'Host' AND host_username = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(host_username)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;
        collect(rows)
    }

    /// Returns whether a row was actually changed. A call with neither a new
    /// rating nor a new comment is a no-op.
    #[tracing::instrument(name = "Updating review", skip(self, comment))]
    pub async fn update(
        &self,
        id: Uuid,
        rating: Option<Rating>,
        comment: Option<&str>,
    ) -> Result<bool, ApiError> {
        if rating.is_none() && comment.is_none() {
            return Ok(false);
        }
        let result = sqlx::query(
            "UPDATE reviews \
             SET rating = COALESCE($2, rating), comment = COALESCE($3, comment) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(rating.map(|r| r.as_i16()))
        .bind(comment)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;
        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(name = "Deleting review", skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to execute query: {:?}", e);
                e
            })?;
        Ok(result.rows_affected() > 0)
    }
}

fn collect(rows: Vec<ReviewRow>) -> Result<Vec<Review>, ApiError> {
    rows.into_iter()
        .map(|row| Review::try_from(row).map_err(ApiError::Internal))
        .collect()
}
