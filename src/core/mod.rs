//! Core business logic - framework-agnostic storefront operations.
//!
//! Repositories are plain structs over a [`KeyValueStore`]; the backend is
//! chosen by whoever builds them ([`SqliteBackend`](crate::store::SqliteBackend)
//! in the binary, [`MemoryBackend`](crate::store::MemoryBackend) in tests).

/// Store configuration record
pub mod app_config;
/// In-memory shopping cart
pub mod cart;
/// Product and category CRUD
pub mod catalog;
/// Cart to order conversion
pub mod checkout;
/// Generated product descriptions and order summaries
pub mod describe;
/// Messaging handoff links
pub mod messaging;
/// Order creation, status and lookup
pub mod orders;
/// Customer-facing order tracking
pub mod tracking;
/// Periodic pending-order poll
pub mod watcher;

use crate::{
    config::catalog::CatalogSeed,
    store::{KeyValueStore, StorageBackend},
};
use app_config::ConfigRepository;
use catalog::CatalogRepository;
use orders::OrderRepository;

/// All repositories over one store.
pub struct Storefront<B> {
    /// Products and categories
    pub catalog: CatalogRepository<B>,
    /// Orders
    pub orders: OrderRepository<B>,
    /// Store configuration
    pub config: ConfigRepository<B>,
}

impl<B: StorageBackend> Storefront<B> {
    /// Builds every repository on top of `store`.
    pub fn new(store: &KeyValueStore<B>, seed: CatalogSeed) -> Self {
        Self {
            catalog: CatalogRepository::new(store.clone(), seed),
            orders: OrderRepository::new(store.clone()),
            config: ConfigRepository::new(store.clone()),
        }
    }
}
