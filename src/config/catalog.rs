//! Catalog seed loading from catalog.toml
//!
//! The seed catalog is what shoppers see before an admin has saved anything:
//! it is the default for absent product and category collections and is
//! written to storage on first run. A `catalog.toml` next to the binary
//! replaces the built-in seed.

use crate::errors::{Error, Result};
use crate::models::{Category, Product};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default seed file location
pub const DEFAULT_CATALOG_PATH: &str = "catalog.toml";

/// Products and categories used to seed an empty store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSeed {
    /// Seed categories
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Seed products
    #[serde(default)]
    pub products: Vec<Product>,
}

impl CatalogSeed {
    /// The catalog the storefront ships with.
    #[must_use]
    pub fn builtin() -> Self {
        let categories = [
            ("cat1", "Phones"),
            ("cat2", "Audio"),
            ("cat3", "Computers"),
            ("cat4", "Accessories"),
            ("cat5", "Smart Home"),
        ]
        .into_iter()
        .map(|(id, name)| Category {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect();

        let products = [
            (
                "1",
                "iPhone 15 Pro Max",
                1299.0,
                "iphone",
                "cat1",
                "The most powerful iPhone yet, with the A17 Pro chip and a 48MP camera.",
                10_u32,
            ),
            (
                "2",
                "Sony WH-1000XM5",
                349.0,
                "headphones",
                "cat2",
                "Headphones with industry-leading noise cancelling.",
                15,
            ),
            (
                "3",
                "MacBook Air M2",
                1099.0,
                "macbook",
                "cat3",
                "Strikingly thin and fast with Apple's M2 chip.",
                5,
            ),
            (
                "4",
                "Apple Watch Series 9",
                399.0,
                "watch",
                "cat4",
                "Smarter, brighter, mightier.",
                20,
            ),
            (
                "5",
                "Google Nest Hub (2nd Gen)",
                99.0,
                "nest",
                "cat5",
                "The centre of your smart home with Google Assistant built in.",
                30,
            ),
        ]
        .into_iter()
        .map(
            |(id, name, price, seed, category_id, description, stock)| Product {
                id: id.to_string(),
                name: name.to_string(),
                price,
                image: format!("https://picsum.photos/seed/{seed}/600/400"),
                category_id: category_id.to_string(),
                description: description.to_string(),
                stock,
                available: true,
            },
        )
        .collect();

        Self {
            categories,
            products,
        }
    }
}

/// Loads a catalog seed from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_catalog_seed<P: AsRef<Path>>(path: P) -> Result<CatalogSeed> {
    let path_ref = path.as_ref();
    debug!("Loading catalog seed from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read catalog seed {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads `catalog.toml` if present, otherwise the built-in seed.
///
/// # Errors
/// Returns an error only if the file exists but cannot be read or parsed.
pub fn load_default_catalog_seed() -> Result<CatalogSeed> {
    if Path::new(DEFAULT_CATALOG_PATH).exists() {
        load_catalog_seed(DEFAULT_CATALOG_PATH)
    } else {
        info!("No {DEFAULT_CATALOG_PATH} found, using built-in catalog");
        Ok(CatalogSeed::builtin())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_catalog_seed() {
        let toml_str = r#"
            [[categories]]
            id = "cat1"
            name = "Phones"

            [[products]]
            id = "1"
            name = "Pixel 8"
            price = 699.0
            image = "https://example.com/pixel.png"
            categoryId = "cat1"
            description = "Android phone"
            stock = 3
            available = false
        "#;

        let seed: CatalogSeed = toml::from_str(toml_str).unwrap();
        assert_eq!(seed.categories.len(), 1);
        assert_eq!(seed.products.len(), 1);
        assert_eq!(seed.products[0].category_id, "cat1");
        assert_eq!(seed.products[0].price, 699.0);
        assert!(!seed.products[0].available);
    }

    #[test]
    fn test_builtin_seed_references_its_categories() {
        let seed = CatalogSeed::builtin();
        assert_eq!(seed.products.len(), 5);
        assert_eq!(seed.categories.len(), 5);

        for product in &seed.products {
            assert!(
                seed.categories.iter().any(|c| c.id == product.category_id),
                "{} points at a missing category",
                product.name
            );
        }
    }

    #[test]
    fn test_load_catalog_seed_missing_file() {
        let result = load_catalog_seed("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
