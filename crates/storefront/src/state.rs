//! Application state shared across surfaces.

use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::services::{
    AuthService, CartService, CheckoutService, CollectionService, OrderService, WalletService,
};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

/// Application state shared across all surfaces.
///
/// This struct is cheaply cloneable via `Arc` and hands out the storage
/// handle, the catalog, and ready-made services over both.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Box<dyn KeyValueStore>,
    catalog: CatalogStore,
}

impl AppState {
    /// Open the file-backed store at the configured data directory and
    /// load the sample catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let store = FileStore::open(&config.data_dir)?;
        Ok(Self::with_store(config, Box::new(store)))
    }

    /// Build state over an explicit store (any backend).
    #[must_use]
    pub fn with_store(config: StorefrontConfig, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                catalog: CatalogStore::sample(),
            }),
        }
    }

    /// Ephemeral state over the in-memory store; what tests use.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_store(StorefrontConfig::default(), Box::new(MemoryStore::new()))
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the key-value store.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Authentication service over this state.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.store())
    }

    /// Cart service over this state.
    #[must_use]
    pub fn carts(&self) -> CartService<'_> {
        CartService::new(self.store(), self.catalog())
    }

    /// Wallet service over this state.
    #[must_use]
    pub fn wallet(&self) -> WalletService<'_> {
        WalletService::new(self.store())
    }

    /// Order service over this state.
    #[must_use]
    pub fn orders(&self) -> OrderService<'_> {
        OrderService::new(self.store())
    }

    /// Collection service over this state.
    #[must_use]
    pub fn collections(&self) -> CollectionService<'_> {
        CollectionService::new(self.store(), self.catalog())
    }

    /// Checkout service over this state, using the configured simulated
    /// latency.
    #[must_use]
    pub fn checkout(&self) -> CheckoutService<'_> {
        CheckoutService::new(self.store(), self.catalog(), self.inner.config.checkout_delay)
    }
}
