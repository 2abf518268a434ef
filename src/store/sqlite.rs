//! `SQLite` backend built on the `kv_store` table.
//!
//! Writes follow the find-then-update-or-insert pattern: look the key up, update
//! the row if it exists, insert it otherwise. Nothing wraps two keys in one
//! transaction.

use super::StorageBackend;
use crate::{
    entities::{KvEntry, kv_entry},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set, prelude::*};
use tracing::debug;

/// Key-value storage persisted through `SeaORM`.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    db: DatabaseConnection,
}

impl SqliteBackend {
    /// Wraps a connection whose tables were created with
    /// [`create_tables`](crate::config::database::create_tables).
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The wrapped connection.
    #[cfg(test)]
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl StorageBackend for SqliteBackend {
    async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let entry = KvEntry::find_by_id(key.to_string()).one(&self.db).await?;
        Ok(entry.map(|e| e.value))
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<()> {
        let now = Utc::now().naive_utc();

        let existing = KvEntry::find_by_id(key.to_string()).one(&self.db).await?;

        if let Some(entry) = existing {
            let mut active_model: kv_entry::ActiveModel = entry.into();
            active_model.value = Set(value);
            active_model.updated_at = Set(now);
            active_model.update(&self.db).await?;
        } else {
            debug!(key, "creating key");
            let new_entry = kv_entry::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value),
                updated_at: Set(now),
            };
            new_entry.insert(&self.db).await?;
        }

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        KvEntry::delete_by_id(key.to_string())
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
