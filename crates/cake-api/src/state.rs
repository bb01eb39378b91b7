//! # Application State
//!
//! Shared state for the axum application: the order service, the draft
//! sessions, and server configuration. Everything is an explicit instance
//! constructed once at startup and handed to the router; no singletons.

use cake_core::{CatalogFile, OrderDraft, OrderService};
use cake_store::MemoryOrderRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit catalog file path (overrides the default search)
    pub catalog_path: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            catalog_path: std::env::var("CATALOG_PATH").ok(),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Draft sessions keyed by customer id; at most one active draft each
pub type DraftSessions = Arc<RwLock<HashMap<String, OrderDraft>>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The order engine
    pub service: Arc<OrderService>,
    /// In-progress drafts, one per customer
    pub drafts: DraftSessions,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state with the in-memory repository and the configured catalog
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let (products, addons) = load_catalog(config.catalog_path.as_deref())?;
        let repository = Arc::new(MemoryOrderRepository::new());
        let service = Arc::new(OrderService::new(products, addons, repository));

        Ok(Self {
            service,
            drafts: Arc::new(RwLock::new(HashMap::new())),
            config,
        })
    }
}

/// Load the product/add-on catalog from a TOML file
fn load_catalog(
    explicit_path: Option<&str>,
) -> anyhow::Result<(cake_core::ProductCatalog, cake_core::AddOnCatalog)> {
    let default_paths = [
        "config/catalog.toml",
        "../config/catalog.toml",
        "../../config/catalog.toml",
    ];
    let candidates: Vec<&str> = match explicit_path {
        Some(path) => vec![path],
        None => default_paths.to_vec(),
    };

    for path in candidates {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = CatalogFile::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!(
                "Loaded {} products and {} add-ons from {}",
                catalog.products.len(),
                catalog.addons.len(),
                path
            );
            return Ok(catalog.into_catalogs());
        }
    }

    // Empty catalogs keep the server bootable for smoke tests.
    tracing::warn!("No catalog file found, using empty catalogs");
    Ok(CatalogFile::default().into_catalogs())
}
