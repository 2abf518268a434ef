//! Storefront records as they are persisted in the key-value store.
//!
//! Field names serialize in camelCase so the stored JSON keeps the layout the
//! browser storefront wrote (`categoryId`, `orderNumber`, `qrCodeUrl`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A product category. Names are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Client-generated identifier
    pub id: String,
    /// Display name
    pub name: String,
}

/// Image used when a product was saved without one
pub const DEFAULT_PRODUCT_IMAGE: &str = "https://picsum.photos/seed/default/600/400";

fn default_image() -> String {
    DEFAULT_PRODUCT_IMAGE.to_string()
}

const fn default_available() -> bool {
    true
}

/// A catalog product.
///
/// The admin form may store products without an image, category,
/// description, stock or availability; those fields fall back to defaults
/// when read so one partial record does not make the whole list unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Client-generated identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Image URL or inline `data:` URI
    #[serde(default = "default_image")]
    pub image: String,
    /// Soft reference to [`Category::id`], never checked
    #[serde(default)]
    pub category_id: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Units in stock (informational only)
    #[serde(default)]
    pub stock: u32,
    /// Whether shoppers can see the product
    #[serde(default = "default_available")]
    pub available: bool,
}

/// One cart line. The product is an embedded copy, not a reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Snapshot of the product when it was added
    pub product: Product,
    /// Always at least 1
    pub quantity: u32,
}

impl CartItem {
    /// `price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Order lifecycle status.
///
/// The ordering `Pending < Accepted < Shipping < Delivered` is used for
/// display only. Transitions are not enforced: the admin may set any status
/// from any status, including moving a delivered order back to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Received, waiting for the admin
    #[serde(alias = "En cola")]
    Pending,
    /// Accepted by the admin
    #[serde(alias = "Aceptado")]
    Accepted,
    /// Out for delivery
    #[serde(alias = "En camino")]
    Shipping,
    /// Delivered to the customer
    #[serde(alias = "Entregado")]
    Delivered,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Accepted,
        Self::Shipping,
        Self::Delivered,
    ];

    /// 1-based position in the lifecycle, for progress displays.
    #[must_use]
    pub const fn step(self) -> usize {
        match self {
            Self::Pending => 1,
            Self::Accepted => 2,
            Self::Shipping => 3,
            Self::Delivered => 4,
        }
    }

    /// The status that normally follows this one, `None` once delivered.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Accepted),
            Self::Accepted => Some(Self::Shipping),
            Self::Shipping => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// `Delivered` is the only terminal status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Shipping => "Shipping",
            Self::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Generated UUID
    pub id: String,
    /// Display label such as `#007`
    pub order_number: String,
    /// Customer full name
    pub customer_name: String,
    /// Contact phone
    pub phone: String,
    /// Delivery address
    pub address: String,
    /// Deep snapshot of the cart at checkout
    pub items: Vec<CartItem>,
    /// Current lifecycle status
    pub status: OrderStatus,
    /// Cart total at checkout
    pub total: f64,
    /// Creation timestamp
    pub date: DateTime<Utc>,
}

/// Global store configuration, a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Image shown to customers for the payment transfer
    pub qr_code_url: String,
    /// Number orders are handed off to
    pub whatsapp_number: String,
    /// Plaintext admin password
    pub admin_password: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            qr_code_url:
                "https://api.qrserver.com/v1/create-qr-code/?size=300x300&data=PagoElectroTech"
                    .to_string(),
            whatsapp_number: "5491122334455".to_string(),
            admin_password: "admin".to_string(),
        }
    }
}
