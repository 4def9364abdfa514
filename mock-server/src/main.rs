use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let public_key = std::env::var("MARVEL_PUBLIC_KEY")
        .unwrap_or_else(|_| mock_server::DEFAULT_PUBLIC_KEY.to_string());
    let private_key = std::env::var("MARVEL_PRIVATE_KEY")
        .unwrap_or_else(|_| mock_server::DEFAULT_PRIVATE_KEY.to_string());

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");
    mock_server::run_app(listener, mock_server::app_with_keys(&public_key, &private_key)).await
}
