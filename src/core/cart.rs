//! Shopping cart - an in-memory list of product snapshots and quantities.
//!
//! The cart is never persisted; it lives as long as the session that owns it.

use crate::models::{CartItem, Product};

/// Transient shopping cart. Every line has a quantity of at least 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds one unit of `product`, appending a new line if it is not in the
    /// cart yet.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            });
        }
    }

    /// Changes the quantity of a line by `delta`, never going below 1.
    ///
    /// Use [`remove`](Self::remove) to take a line out. Unknown ids are ignored.
    pub fn update_quantity(&mut self, product_id: &str, delta: i64) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.product.id == product_id)
        {
            let next = i64::from(item.quantity).saturating_add(delta);
            item.quantity = u32::try_from(next.max(1)).unwrap_or(u32::MAX);
        }
    }

    /// Removes the line for `product_id`.
    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
