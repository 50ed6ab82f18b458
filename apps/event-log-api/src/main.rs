use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let dotenv = dotenvy::dotenv();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    // Any connector failure is fatal; there is no retry
    let mongo_client = database::mongodb::connect_from_config(&config.mongodb).await?;

    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Using MongoDB collection {}.{}",
        config.mongodb.database(),
        config.mongodb.collection()
    );

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let api_routes = api::routes(&state).merge(health_router(state.config.app));

    let app = create_router::<openapi::ApiDoc>(api_routes, &state.config.server);

    info!(
        "Starting {} v{} (30s shutdown timeout)",
        state.config.app.name, state.config.app.version
    );

    let mongo_client = state.mongo_client.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            mongo_client.shutdown().await;
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Event Log API shutdown complete");
    Ok(())
}
