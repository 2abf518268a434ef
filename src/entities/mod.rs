//! Entity module - SeaORM entity definitions for the database.
//! The storefront keeps every collection as a JSON document in a single
//! key-value table, so there is only one entity.

pub mod kv_entry;

pub use kv_entry::{Column as KvEntryColumn, Entity as KvEntry, Model as KvEntryModel};
