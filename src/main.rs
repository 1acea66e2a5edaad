use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use djassapro_backend::config::{Config, LogFormat};
use djassapro_backend::routes;
use djassapro_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("djassapro_backend=debug,tower_http=debug"));
    match config.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
    }

    std::fs::create_dir_all(&config.temp_dir)?;
    info!("Using temp directory {}", config.temp_dir.display());

    let addr = format!("{}:{}", config.host, config.port);
    let app_state = AppState::new(config).await?;
    let app = routes::create_routes(app_state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
