//! Order business logic - creation, status changes and lookups.
//!
//! Orders are only ever appended and have their status changed; nothing here
//! deletes one. The display number is derived from the collection length at
//! creation time (`#001`, `#002`, ...), which stays unique for as long as
//! orders are never removed.

use crate::{
    errors::{Error, Result},
    models::{CartItem, Order, OrderStatus},
    store::{KeyValueStore, ORDERS_KEY, StorageBackend},
};
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Checkout payload before it becomes an [`Order`].
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    /// Customer full name
    pub customer_name: String,
    /// Contact phone
    pub phone: String,
    /// Delivery address
    pub address: String,
    /// Snapshot of the cart lines
    pub items: Vec<CartItem>,
    /// Total charged
    pub total: f64,
}

impl OrderDraft {
    /// Checks the required form fields and the item list.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The customer name, phone or address is blank
    /// - There are no items
    /// - The total is negative or not finite
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("customer_name", &self.customer_name),
            ("phone", &self.phone),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Validation {
                    field,
                    message: "This field is required".to_string(),
                });
            }
        }

        if self.items.is_empty() {
            return Err(Error::EmptyCart);
        }

        if self.total < 0.0 || !self.total.is_finite() {
            return Err(Error::InvalidAmount { amount: self.total });
        }

        Ok(())
    }
}

/// Formats the display number for the `position`-th order (1-based).
#[must_use]
pub fn format_order_number(position: usize) -> String {
    format!("#{position:03}")
}

/// Repository over the order collection.
pub struct OrderRepository<B> {
    store: KeyValueStore<B>,
}

impl<B: StorageBackend> OrderRepository<B> {
    /// Creates a repository on top of `store`.
    pub const fn new(store: KeyValueStore<B>) -> Self {
        Self { store }
    }

    /// Every order, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Order>> {
        self.store.get(ORDERS_KEY).await
    }

    /// Every order, newest first, as the admin listing shows them.
    pub async fn list_recent(&self) -> Result<Vec<Order>> {
        let mut orders = self.list_all().await?;
        orders.reverse();
        Ok(orders)
    }

    /// Finds an order by id.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Order>> {
        Ok(self.list_all().await?.into_iter().find(|o| o.id == id))
    }

    /// Validates the draft, then appends a new pending order.
    ///
    /// The stored order owns its own copy of the items, so later changes to
    /// the cart or the catalog do not reach it.
    ///
    /// # Errors
    /// Returns an error if the draft fails [`OrderDraft::validate`] or the
    /// store cannot be written.
    #[instrument(skip(self, draft), fields(customer = %draft.customer_name))]
    pub async fn create(&self, draft: OrderDraft) -> Result<Order> {
        draft.validate()?;

        let mut orders = self.list_all().await?;

        let order = Order {
            id: Uuid::new_v4().to_string(),
            order_number: format_order_number(orders.len() + 1),
            customer_name: draft.customer_name,
            phone: draft.phone,
            address: draft.address,
            items: draft.items,
            status: OrderStatus::Pending,
            total: draft.total,
            date: Utc::now(),
        };

        orders.push(order.clone());
        self.store.set(ORDERS_KEY, &orders).await?;

        info!(
            order_number = %order.order_number,
            total = order.total,
            "Order created"
        );
        Ok(order)
    }

    /// Sets the status of an order, whatever its current status is.
    ///
    /// Returns the updated order, or `None` (and writes nothing) if no order
    /// has this id.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> Result<Option<Order>> {
        let mut orders = self.list_all().await?;

        let Some(order) = orders.iter_mut().find(|o| o.id == id) else {
            debug!("No order with this id, nothing to update");
            return Ok(None);
        };

        let previous = order.status;
        order.status = status;
        let updated = order.clone();

        self.store.set(ORDERS_KEY, &orders).await?;
        info!(
            order_number = %updated.order_number,
            from = %previous,
            to = %status,
            "Order status changed"
        );
        Ok(Some(updated))
    }

    /// Number of orders still pending.
    pub async fn pending_count(&self) -> Result<usize> {
        Ok(self
            .list_all()
            .await?
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count())
    }

    /// Whether any order is still pending.
    pub async fn has_pending(&self) -> Result<bool> {
        Ok(self.pending_count().await? > 0)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_format_order_number() {
        assert_eq!(format_order_number(1), "#001");
        assert_eq!(format_order_number(42), "#042");
        assert_eq!(format_order_number(1000), "#1000");
    }

    #[tokio::test]
    async fn test_sequential_order_numbers() -> Result<()> {
        let orders = OrderRepository::new(memory_store());

        let first = orders.create(test_order_draft(2)).await?;
        let second = orders.create(test_order_draft(1)).await?;

        assert_eq!(first.order_number, "#001");
        assert_eq!(second.order_number, "#002");
        assert_ne!(first.id, second.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_returns_pending_snapshot() -> Result<()> {
        let orders = OrderRepository::new(memory_store());
        let mut draft = test_order_draft(3);
        let original_items = draft.items.clone();

        let order = orders.create(draft.clone()).await?;
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items, original_items);
        assert_eq!(order.total, 3.0 * 1299.0);

        // Mutating the source afterwards must not reach the stored order
        draft.items[0].quantity = 99;
        draft.items[0].product.price = 1.0;
        draft.total = 0.0;

        let stored = orders.find_by_id(&order.id).await?.unwrap();
        assert_eq!(stored.items, original_items);
        assert_eq!(stored.total, 3.0 * 1299.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_drafts() -> Result<()> {
        let orders = OrderRepository::new(memory_store());

        let mut draft = test_order_draft(1);
        draft.phone = "  ".to_string();
        assert!(matches!(
            orders.create(draft).await.unwrap_err(),
            Error::Validation { field: "phone", .. }
        ));

        let mut draft = test_order_draft(1);
        draft.items.clear();
        assert!(matches!(
            orders.create(draft).await.unwrap_err(),
            Error::EmptyCart
        ));

        assert!(orders.list_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_is_permissive() -> Result<()> {
        let orders = OrderRepository::new(memory_store());
        let order = orders.create(test_order_draft(1)).await?;

        let delivered = orders
            .update_status(&order.id, OrderStatus::Delivered)
            .await?
            .unwrap();
        assert_eq!(delivered.status, OrderStatus::Delivered);

        // Backwards moves are allowed
        let back = orders
            .update_status(&order.id, OrderStatus::Pending)
            .await?
            .unwrap();
        assert_eq!(back.status, OrderStatus::Pending);

        let stored = orders.find_by_id(&order.id).await?.unwrap();
        assert_eq!(stored.status, OrderStatus::Pending);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_unknown_id_is_noop() -> Result<()> {
        let orders = OrderRepository::new(memory_store());
        orders.create(test_order_draft(1)).await?;
        orders.create(test_order_draft(2)).await?;
        let before = orders.list_all().await?;

        let result = orders
            .update_status("no-such-order", OrderStatus::Shipping)
            .await?;
        assert!(result.is_none());
        assert_eq!(orders.list_all().await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_recent_and_pending() -> Result<()> {
        let orders = OrderRepository::new(memory_store());
        assert!(!orders.has_pending().await?);

        let first = orders.create(test_order_draft(1)).await?;
        let second = orders.create(test_order_draft(1)).await?;
        orders
            .update_status(&first.id, OrderStatus::Accepted)
            .await?;

        let recent = orders.list_recent().await?;
        assert_eq!(recent[0].id, second.id);
        assert_eq!(recent[1].id, first.id);

        assert_eq!(orders.pending_count().await?, 1);
        assert!(orders.has_pending().await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() -> Result<()> {
        let orders = OrderRepository::new(memory_store());
        assert!(orders.find_by_id("missing").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_order_with_partial_product_keeps_history() -> Result<()> {
        let store = memory_store();
        store
            .backend()
            .set_raw(
                ORDERS_KEY,
                r##"[{"id":"old","orderNumber":"#001","customerName":"Grace","phone":"1",
                    "address":"Somewhere","items":[{"product":{"id":"a","name":"Cable","price":5},
                    "quantity":2}],"status":"En cola","total":10,"date":"2025-01-01T00:00:00Z"}]"##
                    .to_string(),
            )
            .await?;
        let orders = OrderRepository::new(store);

        let old = orders.find_by_id("old").await?.unwrap();
        assert_eq!(old.items[0].product.description, "");
        assert_eq!(old.status, OrderStatus::Pending);

        let created = orders.create(test_order_draft(1)).await?;
        assert_eq!(created.order_number, "#002");
        assert_eq!(orders.list_all().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_orders_on_sqlite() -> Result<()> {
        let orders = OrderRepository::new(sqlite_store().await?);

        let order = orders.create(test_order_draft(1)).await?;
        orders
            .update_status(&order.id, OrderStatus::Shipping)
            .await?;

        let stored = orders.find_by_id(&order.id).await?.unwrap();
        assert_eq!(stored.status, OrderStatus::Shipping);
        assert_eq!(stored.order_number, "#001");
        assert_eq!(stored.date, order.date);
        Ok(())
    }
}
