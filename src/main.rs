mod api;
mod models;
mod settings;
mod share;
mod store;

use api::{create_router, AppState};
use settings::Settings;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🏠 Deal Room");
    info!("===========");

    let settings = Settings::load()?;
    info!(
        bind = %settings.bind_address,
        base_url = %settings.base_url,
        policy = ?settings.unknown_listing_policy,
        "Configuration loaded"
    );

    let bind_address = settings.bind_address.clone();
    let state = Arc::new(AppState::from_settings(settings)?);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("🚪 Listening on {}", bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
