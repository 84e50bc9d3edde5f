use tokio::net::TcpListener;
use review_service::configuration::get_configuration;
use review_service::{startup::{router, build}, get_subscriber, init_subscriber};
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_subscriber(get_subscriber(
        "review-service".into(),
        "info".into(),
        std::io::stdout,
    ));

    let configuration = get_configuration().expect("Failed to read configuration.");
    let listener = TcpListener::bind(configuration.application.address()).await?;
    let app = router(build(configuration)?);
    tracing::info!("Starting review-service");
    Ok(axum::serve(listener, app).await?)
}
