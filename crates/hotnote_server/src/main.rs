use hotnote_core::HotnoteConfig;
use hotnote_error::{ConfigError, HotnoteResult};
use hotnote_server::{create_router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> HotnoteResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = HotnoteConfig::from_env()?;
    let bind_addr = config.bind_addr().clone();
    let state = AppState::from_config(config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| ConfigError::new(format!("cannot bind {bind_addr}: {e}")))?;
    info!(%bind_addr, "Hotnote server listening");
    axum::serve(listener, app)
        .await
        .map_err(|e| ConfigError::new(format!("server error: {e}")))?;
    Ok(())
}
