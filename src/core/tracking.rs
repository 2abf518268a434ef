//! Order tracking - the read-only view a customer gets for their order id.

use super::orders::OrderRepository;
use crate::{
    errors::Result,
    models::{Order, OrderStatus},
    store::StorageBackend,
};
use std::fmt::Write;

/// Result of looking an order up by id.
#[derive(Debug, Clone, PartialEq)]
pub enum Tracking {
    /// The order exists
    Found(TrackingView),
    /// No order has this id
    NotFound,
}

/// What the tracking page shows for one order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingView {
    /// Display number such as `#003`
    pub order_number: String,
    /// Current status
    pub status: OrderStatus,
    /// 1-based lifecycle step of `status`
    pub step: usize,
    /// Total number of lifecycle steps
    pub total_steps: usize,
    /// Status the order normally moves to next, `None` once delivered
    pub next_status: Option<OrderStatus>,
    /// Whether the order has reached its last status
    pub complete: bool,
    /// Customer name
    pub customer_name: String,
    /// `"2x Product"` lines
    pub lines: Vec<String>,
    /// Order total
    pub total: f64,
}

impl From<&Order> for TrackingView {
    fn from(order: &Order) -> Self {
        Self {
            order_number: order.order_number.clone(),
            status: order.status,
            step: order.status.step(),
            total_steps: OrderStatus::ALL.len(),
            next_status: order.status.next(),
            complete: order.status.is_terminal(),
            customer_name: order.customer_name.clone(),
            lines: order
                .items
                .iter()
                .map(|i| format!("{}x {}", i.quantity, i.product.name))
                .collect(),
            total: order.total,
        }
    }
}

impl TrackingView {
    /// Plain-text rendering of the view.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!(
            "Order {} - {} (step {}/{})\n",
            self.order_number, self.status, self.step, self.total_steps
        );

        // write! into a String cannot fail
        match self.next_status {
            Some(next) => {
                let _ = writeln!(out, "Next: {next}");
            }
            None => out.push_str("Complete\n"),
        }
        let _ = writeln!(out, "Customer: {}", self.customer_name);
        for line in &self.lines {
            let _ = writeln!(out, "  {line}");
        }
        let _ = write!(out, "Total: ${:.2}", self.total);
        out
    }
}

/// Looks up an order for the tracking page.
pub async fn track<B: StorageBackend>(orders: &OrderRepository<B>, id: &str) -> Result<Tracking> {
    Ok(orders
        .find_by_id(id)
        .await?
        .map_or(Tracking::NotFound, |order| {
            Tracking::Found(TrackingView::from(&order))
        }))
}
