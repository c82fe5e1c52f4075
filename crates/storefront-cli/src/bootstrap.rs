//! Composition root: config, logging, and the one `AppStore` per process.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use storefront_application::{AppStore, NavigationGuard, Router};
use storefront_core::config::StorefrontConfig;
use storefront_core::storage::KeyValueStore;
use storefront_infrastructure::config_service::{self, ConfigService};
use storefront_infrastructure::FileKeyValueStore;
use storefront_interaction::RestApiClient;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub struct AppContext {
    pub config: StorefrontConfig,
    pub store: Arc<AppStore>,
    pub router: Router,
}

impl AppContext {
    pub fn build(config: StorefrontConfig) -> Result<Self> {
        let storage_path = config_service::storage_path(&config)?;
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::open(&storage_path));

        let client = RestApiClient::from_config(&config.api, storage.clone())
            .context("Failed to create API client")?;
        let store = Arc::new(AppStore::new(Arc::new(client), storage));
        let router = Router::new(NavigationGuard::new(store.clone()));

        tracing::debug!(
            "[Bootstrap] API {} / storage {:?}",
            config.api.base_url,
            storage_path
        );

        Ok(Self {
            config,
            store,
            router,
        })
    }
}

/// Loads config from `path` (or the default location), then applies the
/// command-line URL override on top of file and environment.
pub fn load_config(path: Option<&Path>, api_url: Option<&str>) -> Result<StorefrontConfig> {
    let service = match path {
        Some(path) => ConfigService::new(path),
        None => ConfigService::default_location()?,
    };
    let mut config = service.load()?;

    if let Some(url) = api_url.map(str::trim).filter(|url| !url.is_empty()) {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    Ok(config)
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr so command
/// output on stdout stays machine-readable.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
