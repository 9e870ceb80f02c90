// src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use switchon::{
    app,
    config::{AppState, Settings},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("switchon=info,tower_http=info")),
        )
        .with_target(false)
        .compact()
        .init();

    let settings = Settings::from_env()?;
    let app_state = AppState::new(&settings).await?;

    let app = app::router(app_state);

    let listener = TcpListener::bind(("0.0.0.0", settings.port)).await?;
    tracing::info!("🚀 Server listening on {}", listener.local_addr()?);
    tracing::info!("📖 API docs at /swagger-ui");

    axum::serve(listener, app).await?;

    Ok(())
}
