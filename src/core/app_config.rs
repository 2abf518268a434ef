//! Store configuration record - payment QR, contact number, admin password.

use crate::{
    errors::Result,
    models::AppConfig,
    store::{CONFIG_KEY, KeyValueStore, StorageBackend},
};
use tracing::{info, instrument, warn};

/// Repository over the single [`AppConfig`] record.
pub struct ConfigRepository<B> {
    store: KeyValueStore<B>,
}

impl<B: StorageBackend> ConfigRepository<B> {
    /// Creates a repository on top of `store`.
    pub const fn new(store: KeyValueStore<B>) -> Self {
        Self { store }
    }

    /// The stored config, or the built-in default if none was saved.
    pub async fn get(&self) -> Result<AppConfig> {
        self.store.get(CONFIG_KEY).await
    }

    /// Replaces the whole record. Field formats are not checked.
    #[instrument(skip_all)]
    pub async fn set(&self, config: &AppConfig) -> Result<()> {
        self.store.set(CONFIG_KEY, config).await?;
        info!("Store config saved");
        Ok(())
    }

    /// Compares `candidate` against the stored admin password.
    pub async fn verify_admin_password(&self, candidate: &str) -> Result<bool> {
        let matches = self.get().await?.admin_password == candidate;
        if !matches {
            warn!("Rejected admin password");
        }
        Ok(matches)
    }
}
