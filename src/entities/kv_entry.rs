//! Key-value entry entity - Backing table for the persistent key-value store.
//!
//! Each row holds one whole collection (products, categories, orders) or the
//! config record, serialized as a JSON document under its storage key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Key-value database model - one JSON document per storage key
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kv_store")]
pub struct Model {
    /// Storage key (e.g., `"electrotech_products"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// JSON-serialized value
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this key was last written
    pub updated_at: DateTime,
}

/// `KvEntry` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
