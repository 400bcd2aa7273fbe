use std::{net::SocketAddr, sync::Arc};

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use geo_analytics_api::{AppState, Config, HttpAnalyticsSource, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let source = HttpAnalyticsSource::new(&config)?;
    let state = AppState::new(Arc::new(source));

    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
