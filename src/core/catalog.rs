//! Catalog business logic - products and categories.
//!
//! Both collections are stored whole under a single key each. Every write reads
//! the full collection, changes a copy and writes it all back. Two writers
//! working at the same time can overwrite each other; the last write wins.
//!
//! Products point at categories through `category_id` only. Nothing checks that
//! the category exists, and deleting a category leaves its products in place.

use crate::{
    config::catalog::CatalogSeed,
    errors::{Error, Result},
    models::{Category, Product},
    store::{CATEGORIES_KEY, KeyValueStore, PRODUCTS_KEY, StorageBackend},
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Repository over the product and category collections.
pub struct CatalogRepository<B> {
    store: KeyValueStore<B>,
    seed: CatalogSeed,
}

impl<B: StorageBackend> CatalogRepository<B> {
    /// Creates a repository whose absent collections read as `seed`.
    pub const fn new(store: KeyValueStore<B>, seed: CatalogSeed) -> Self {
        Self { store, seed }
    }

    /// Writes the seed catalog if nothing has been stored yet.
    ///
    /// Products are written before categories. A failure between the two
    /// writes leaves the store partly seeded; the next call fills in the rest.
    /// Returns `true` if anything was written.
    #[instrument(skip(self))]
    pub async fn seed_if_empty(&self) -> Result<bool> {
        let mut seeded = false;

        if !self.store.contains(PRODUCTS_KEY).await? {
            self.store.set(PRODUCTS_KEY, &self.seed.products).await?;
            info!("Seeded {} products", self.seed.products.len());
            seeded = true;
        }

        if !self.store.contains(CATEGORIES_KEY).await? {
            self.store.set(CATEGORIES_KEY, &self.seed.categories).await?;
            info!("Seeded {} categories", self.seed.categories.len());
            seeded = true;
        }

        Ok(seeded)
    }

    /// All products in storage order, including unavailable ones.
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.store
            .get_or_else(PRODUCTS_KEY, || self.seed.products.clone())
            .await
    }

    /// Finds a product by id.
    pub async fn find_product(&self, id: &str) -> Result<Option<Product>> {
        Ok(self.list_products().await?.into_iter().find(|p| p.id == id))
    }

    /// Inserts the product, or fully replaces the one with the same id.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn save_product(&self, product: Product) -> Result<Product> {
        let mut products = self.list_products().await?;

        if let Some(existing) = products.iter_mut().find(|p| p.id == product.id) {
            debug!("Replacing product");
            existing.clone_from(&product);
        } else {
            debug!("Inserting product");
            products.push(product.clone());
        }

        self.store.set(PRODUCTS_KEY, &products).await?;
        Ok(product)
    }

    /// Removes the product with this id. Unknown ids are ignored.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<()> {
        let mut products = self.list_products().await?;
        products.retain(|p| p.id != id);
        self.store.set(PRODUCTS_KEY, &products).await
    }

    /// All categories in storage order.
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.store
            .get_or_else(CATEGORIES_KEY, || self.seed.categories.clone())
            .await
    }

    /// Finds a category by id.
    pub async fn find_category(&self, id: &str) -> Result<Option<Category>> {
        Ok(self
            .list_categories()
            .await?
            .into_iter()
            .find(|c| c.id == id))
    }

    /// Inserts the category, or fully replaces the one with the same id.
    #[instrument(skip(self, category), fields(category_id = %category.id))]
    pub async fn save_category(&self, category: Category) -> Result<Category> {
        let mut categories = self.list_categories().await?;

        if let Some(existing) = categories.iter_mut().find(|c| c.id == category.id) {
            existing.clone_from(&category);
        } else {
            categories.push(category.clone());
        }

        self.store.set(CATEGORIES_KEY, &categories).await?;
        Ok(category)
    }

    /// Removes the category. Products that reference it are left untouched.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: &str) -> Result<()> {
        let mut categories = self.list_categories().await?;
        categories.retain(|c| c.id != id);
        self.store.set(CATEGORIES_KEY, &categories).await
    }

    /// Products a shopper can see: available ones matching the filter.
    pub async fn storefront_products(&self, filter: &CatalogFilter) -> Result<Vec<Product>> {
        Ok(self
            .list_products()
            .await?
            .into_iter()
            .filter(|p| p.available && filter.matches(p))
            .collect())
    }
}

/// Shopper-side narrowing of the product list.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Only products in this category; `None` means all categories
    pub category_id: Option<String>,
    /// Case-insensitive substring of the product name
    pub search: Option<String>,
}

impl CatalogFilter {
    /// Whether `product` passes the category and search conditions.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category_id
            .as_deref()
            .is_none_or(|id| product.category_id == id);

        let search_ok = self.search.as_deref().is_none_or(|query| {
            product
                .name
                .to_lowercase()
                .contains(&query.trim().to_lowercase())
        });

        category_ok && search_ok
    }
}

/// A product as typed into the admin form, validated only on submit.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    /// Existing id when editing, `None` when creating
    pub id: Option<String>,
    /// Product name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Image URL or `data:` URI
    pub image: String,
    /// Category id, not checked against the category list
    pub category_id: String,
    /// Description, possibly produced by the description generator
    pub description: String,
    /// Units in stock
    pub stock: u32,
    /// Shopper visibility
    pub available: bool,
}

impl ProductDraft {
    /// Starts a draft from an existing product, for editing.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id.clone()),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category_id: product.category_id.clone(),
            description: product.description.clone(),
            stock: product.stock,
            available: product.available,
        }
    }

    /// Validates the draft and produces a product, assigning an id if needed.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The name is empty or whitespace-only
    /// - The price is negative or not finite (NaN, infinity)
    pub fn validate(self) -> Result<Product> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation {
                field: "name",
                message: "Product name cannot be empty".to_string(),
            });
        }

        if self.price < 0.0 || !self.price.is_finite() {
            return Err(Error::InvalidAmount { amount: self.price });
        }

        Ok(Product {
            id: self.id.unwrap_or_else(new_id),
            name: self.name.trim().to_string(),
            price: self.price,
            image: self.image,
            category_id: self.category_id,
            description: self.description,
            stock: self.stock,
            available: self.available,
        })
    }
}

/// A category as typed into the admin form.
#[derive(Debug, Clone, Default)]
pub struct CategoryDraft {
    /// Existing id when editing, `None` when creating
    pub id: Option<String>,
    /// Category name
    pub name: String,
}

impl CategoryDraft {
    /// Validates the draft and produces a category, assigning an id if needed.
    ///
    /// # Errors
    /// Returns an error if the name is empty or whitespace-only.
    pub fn validate(self) -> Result<Category> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation {
                field: "name",
                message: "Category name cannot be empty".to_string(),
            });
        }

        Ok(Category {
            id: self.id.unwrap_or_else(new_id),
            name: self.name.trim().to_string(),
        })
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_partial_stored_product_survives_next_save() -> Result<()> {
        let store = memory_store();
        store
            .backend()
            .set_raw(
                PRODUCTS_KEY,
                r#"[{"id":"a","name":"Admin Cable","price":5,"categoryId":"cat1","stock":0,"available":true}]"#
                    .to_string(),
            )
            .await?;
        let catalog = CatalogRepository::new(store, CatalogSeed::builtin());

        let listed = catalog.list_products().await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "a");
        assert_eq!(listed[0].description, "");

        catalog.save_product(test_product("new", 1.0, "cat1")).await?;
        let ids: Vec<String> = catalog
            .list_products()
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["a".to_string(), "new".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_absent_collections_read_as_seed() -> Result<()> {
        let catalog = memory_catalog();

        let products = catalog.list_products().await?;
        let categories = catalog.list_categories().await?;
        assert_eq!(products.len(), 5);
        assert_eq!(categories.len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_if_empty_writes_once() -> Result<()> {
        let catalog = memory_catalog();

        assert!(catalog.seed_if_empty().await?);
        assert!(!catalog.seed_if_empty().await?);

        catalog.delete_product("1").await?;
        // A deleted seed product must not come back
        assert!(!catalog.seed_if_empty().await?);
        assert!(catalog.find_product("1").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_product_inserts_then_replaces() -> Result<()> {
        let catalog = empty_catalog(memory_store());

        catalog.save_product(test_product("a", 10.0, "cat1")).await?;
        let mut edited = test_product("a", 12.5, "cat2");
        edited.name = "Renamed".to_string();
        catalog.save_product(edited).await?;

        let products = catalog.list_products().await?;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Renamed");
        assert_eq!(products[0].price, 12.5);
        assert_eq!(products[0].category_id, "cat2");
        Ok(())
    }

    #[tokio::test]
    async fn test_replayed_saves_and_deletes_keep_one_entry_per_id() -> Result<()> {
        let catalog = empty_catalog(memory_store());

        catalog.save_product(test_product("a", 1.0, "c")).await?;
        catalog.save_product(test_product("b", 2.0, "c")).await?;
        catalog.save_product(test_product("a", 3.0, "c")).await?;
        catalog.save_product(test_product("a", 3.0, "c")).await?;
        catalog.delete_product("b").await?;
        catalog.save_product(test_product("c", 4.0, "c")).await?;
        catalog.save_product(test_product("b", 5.0, "c")).await?;
        catalog.delete_product("missing").await?;

        let products = catalog.list_products().await?;
        let mut ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let price_of = |id: &str| products.iter().find(|p| p.id == id).unwrap().price;
        assert_eq!(price_of("a"), 3.0);
        assert_eq!(price_of("b"), 5.0);
        assert_eq!(price_of("c"), 4.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_leaves_orphaned_products() -> Result<()> {
        let catalog = memory_catalog();
        catalog.seed_if_empty().await?;

        catalog.delete_category("cat1").await?;

        assert!(catalog.find_category("cat1").await?.is_none());
        let orphans: Vec<Product> = catalog
            .list_products()
            .await?
            .into_iter()
            .filter(|p| p.category_id == "cat1")
            .collect();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].id, "1");
        Ok(())
    }

    #[tokio::test]
    async fn test_save_and_find_category() -> Result<()> {
        let catalog = empty_catalog(memory_store());

        let category = CategoryDraft {
            id: None,
            name: "  Cameras ".to_string(),
        }
        .validate()?;
        catalog.save_category(category.clone()).await?;

        let found = catalog.find_category(&category.id).await?.unwrap();
        assert_eq!(found.name, "Cameras");

        catalog
            .save_category(Category {
                id: category.id.clone(),
                name: "Photo".to_string(),
            })
            .await?;
        let categories = catalog.list_categories().await?;
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Photo");
        Ok(())
    }

    #[tokio::test]
    async fn test_storefront_products_filters() -> Result<()> {
        let catalog = empty_catalog(memory_store());
        let mut hidden = test_product("h", 5.0, "cat1");
        hidden.name = "Hidden Phone".to_string();
        hidden.available = false;
        let mut phone = test_product("p", 5.0, "cat1");
        phone.name = "Pixel Phone".to_string();
        let mut speaker = test_product("s", 5.0, "cat2");
        speaker.name = "Speaker".to_string();
        for product in [hidden, phone, speaker] {
            catalog.save_product(product).await?;
        }

        let all = catalog
            .storefront_products(&CatalogFilter::default())
            .await?;
        assert_eq!(all.len(), 2);

        let in_cat1 = catalog
            .storefront_products(&CatalogFilter {
                category_id: Some("cat1".to_string()),
                search: None,
            })
            .await?;
        assert_eq!(in_cat1.len(), 1);
        assert_eq!(in_cat1[0].id, "p");

        let searched = catalog
            .storefront_products(&CatalogFilter {
                category_id: None,
                search: Some("SPEAK".to_string()),
            })
            .await?;
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].id, "s");
        Ok(())
    }

    #[test]
    fn test_product_draft_validation() {
        let result = ProductDraft {
            name: "   ".to_string(),
            price: 1.0,
            ..Default::default()
        }
        .validate();
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { field: "name", .. }
        ));

        let result = ProductDraft {
            name: "Cable".to_string(),
            price: -1.0,
            ..Default::default()
        }
        .validate();
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: -1.0 }
        ));

        let result = ProductDraft {
            name: "Cable".to_string(),
            price: f64::NAN,
            ..Default::default()
        }
        .validate();
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));
    }

    #[test]
    fn test_product_draft_assigns_or_keeps_id() {
        let created = ProductDraft {
            name: "Cable".to_string(),
            price: 9.99,
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert!(Uuid::parse_str(&created.id).is_ok());

        let existing = test_product("42", 3.0, "cat1");
        let edited = ProductDraft::from_product(&existing).validate().unwrap();
        assert_eq!(edited, existing);
    }

    #[tokio::test]
    async fn test_catalog_on_sqlite() -> Result<()> {
        let store = sqlite_store().await?;
        let catalog = empty_catalog(store);

        catalog.save_product(test_product("1", 1299.0, "cat1")).await?;
        let found = catalog.find_product("1").await?.unwrap();
        assert_eq!(found.price, 1299.0);
        Ok(())
    }
}
