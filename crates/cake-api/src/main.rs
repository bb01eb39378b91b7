//! # Crumbcart
//!
//! Bespoke bakery order service: pricing, lead time, and lifecycle.
//!
//! ## Usage
//!
//! ```bash
//! # Optional configuration
//! export HOST=0.0.0.0
//! export PORT=8080
//! export CATALOG_PATH=config/catalog.toml
//!
//! # Run the server
//! crumbcart
//! ```

use cake_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Products loaded: {}",
        state.service.products().products.len()
    );
    info!("Add-ons loaded: {}", state.service.addons().addons.len());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🧁 Crumbcart starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!("🎂 Start a draft: POST http://{}/api/v1/drafts", addr);
        info!("💳 Pay deposit: POST http://{}/api/v1/orders/{{n}}/deposit", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
