use axum::http::HeaderValue;
use sqlx::PgPool;

use crate::repository::ReviewRepository;
use crate::reservations_client::ReservationsClient;

#[derive(Clone)]
pub struct AppState {
    pub connection_pool: PgPool,
    pub repository: ReviewRepository,
    pub reservations_client: ReservationsClient,
    pub allowed_origin: HeaderValue,
}
