//! Shared test utilities for the storefront.
//!
//! Helpers for building stores over both backends and for creating test
//! records with sensible defaults.

use crate::{
    config::catalog::CatalogSeed,
    core::{catalog::CatalogRepository, checkout::CustomerDetails, orders::OrderDraft},
    errors::Result,
    models::{CartItem, Order, OrderStatus, Product},
    store::{KeyValueStore, MemoryBackend, SqliteBackend},
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with the key-value table created.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A store over a fresh in-memory `SQLite` database.
pub async fn sqlite_store() -> Result<KeyValueStore<SqliteBackend>> {
    Ok(KeyValueStore::new(SqliteBackend::new(setup_test_db().await?)))
}

/// A store over a fresh [`MemoryBackend`].
#[must_use]
pub fn memory_store() -> KeyValueStore<MemoryBackend> {
    KeyValueStore::new(MemoryBackend::new())
}

/// A catalog over a memory store that defaults to the built-in seed.
#[must_use]
pub fn memory_catalog() -> CatalogRepository<MemoryBackend> {
    CatalogRepository::new(memory_store(), CatalogSeed::builtin())
}

/// A catalog whose absent collections read as empty.
pub fn empty_catalog<B: crate::store::StorageBackend>(
    store: KeyValueStore<B>,
) -> CatalogRepository<B> {
    CatalogRepository::new(store, CatalogSeed::default())
}

/// Creates a test product.
///
/// # Defaults
/// * `name`: `"Test Product <id>"`
/// * `stock`: 10
/// * `available`: true
#[must_use]
pub fn test_product(id: &str, price: f64, category_id: &str) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Test Product {id}"),
        price,
        image: "https://example.com/product.png".to_string(),
        category_id: category_id.to_string(),
        description: "A product used in tests".to_string(),
        stock: 10,
        available: true,
    }
}

/// The first built-in product: iPhone 15 Pro Max, 1299, `cat1`.
#[must_use]
pub fn seed_phone() -> Product {
    CatalogSeed::builtin()
        .products
        .into_iter()
        .next()
        .unwrap_or_else(|| test_product("1", 1299.0, "cat1"))
}

/// Checkout form details for a test customer.
#[must_use]
pub fn test_customer() -> CustomerDetails {
    CustomerDetails {
        name: "Ada Lovelace".to_string(),
        phone: "+44 20 7946 0000".to_string(),
        address: "12 St James's Square, London".to_string(),
    }
}

/// An order draft with `quantity` units of [`seed_phone`].
#[must_use]
pub fn test_order_draft(quantity: u32) -> OrderDraft {
    let product = seed_phone();
    let total = product.price * f64::from(quantity);
    let customer = test_customer();

    OrderDraft {
        customer_name: customer.name,
        phone: customer.phone,
        address: customer.address,
        items: vec![CartItem { product, quantity }],
        total,
    }
}

/// A stored-looking order `#001` built from [`test_order_draft`].
#[must_use]
pub fn test_order(quantity: u32) -> Order {
    let draft = test_order_draft(quantity);
    Order {
        id: "order-1".to_string(),
        order_number: "#001".to_string(),
        customer_name: draft.customer_name,
        phone: draft.phone,
        address: draft.address,
        items: draft.items,
        status: OrderStatus::Pending,
        total: draft.total,
        date: chrono::Utc::now(),
    }
}
