//! Checkout - turns the cart into a persisted order.

use super::{
    cart::Cart,
    orders::{OrderDraft, OrderRepository},
};
use crate::{
    errors::{Error, Result},
    models::Order,
    store::StorageBackend,
};
use tracing::instrument;

/// Contact details entered on the checkout form.
#[derive(Debug, Clone, Default)]
pub struct CustomerDetails {
    /// Full name
    pub name: String,
    /// Contact phone
    pub phone: String,
    /// Delivery address or location
    pub address: String,
}

/// Places an order for everything in `cart`.
///
/// The order gets its own copy of the cart lines and the cart total. The cart
/// is emptied only once the order is stored; on any error it is left as is.
///
/// # Errors
/// Returns [`Error::EmptyCart`] for an empty cart, a validation error for a
/// blank form field, or a storage error.
#[instrument(skip_all, fields(lines = cart.items().len()))]
pub async fn checkout<B: StorageBackend>(
    orders: &OrderRepository<B>,
    cart: &mut Cart,
    customer: CustomerDetails,
) -> Result<Order> {
    if cart.is_empty() {
        return Err(Error::EmptyCart);
    }

    let draft = OrderDraft {
        customer_name: customer.name,
        phone: customer.phone,
        address: customer.address,
        items: cart.items().to_vec(),
        total: cart.total(),
    };

    let order = orders.create(draft).await?;
    cart.clear();
    Ok(order)
}
