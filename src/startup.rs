use axum::{
    http::{HeaderName, HeaderValue},
    routing::get,
    Router,
};
use eyre::Result;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{
    app_state::AppState, configuration::Settings, repository::ReviewRepository,
    reservations_client::ReservationsClient, routes,
};

pub fn build(configuration: Settings) -> Result<AppState> {
    let connection_pool = PgPool::connect_lazy_with(configuration.database.with_db());
    let reservations_client = ReservationsClient::new(
        configuration.reservations.base_url.clone(),
        configuration.reservations.timeout(),
    )?;
    let allowed_origin = configuration
        .application
        .allowed_origin
        .parse::<HeaderValue>()?;

    Ok(AppState {
        repository: ReviewRepository::new(connection_pool.clone()),
        connection_pool,
        reservations_client,
        allowed_origin,
    })
}

pub fn router(state: AppState) -> Router {
    let request_id = HeaderName::from_static("x-request-id");
    let cors = CorsLayer::new()
        .allow_origin(state.allowed_origin.clone())
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/reviews/health", get(routes::health_check))
        .route(
            "/reviews",
            get(routes::list_reviews).post(routes::create_review),
        )
        .route(
            "/reviews/accommodations/{id}",
            get(routes::accommodation_reviews),
        )
        .route("/reviews/hosts/{username}", get(routes::host_reviews))
        .route(
            "/reviews/{id}",
            get(routes::get_review)
                .put(routes::update_review)
                .delete(routes::delete_review),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().include_headers(true))
                        .on_response(DefaultOnResponse::new().include_headers(true)),
                )
                .layer(cors),
        )
        .with_state(state)
}
