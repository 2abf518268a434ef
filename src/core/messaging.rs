//! Outbound messaging handoff.
//!
//! Builds the pre-filled confirmation text and the `wa.me` link the customer
//! opens to send it. Nothing is sent from here and there is no delivery
//! confirmation.

use crate::{
    errors::{Error, Result},
    models::Order,
};
use std::fmt::Write;
use url::Url;

const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Confirmation text for a freshly placed order.
#[must_use]
pub fn order_message(order: &Order) -> String {
    let mut text = String::from("🛒 *NEW ORDER*\n\n");

    // write! into a String cannot fail
    let _ = writeln!(text, "*Order number:* {}", order.order_number);
    let _ = writeln!(text, "*Customer:* {}", order.customer_name);
    let _ = write!(text, "*Address:* {}\n\n", order.address);

    text.push_str("*Items:*\n");
    for item in &order.items {
        let _ = writeln!(text, "{}x {}", item.quantity, item.product.name);
    }

    let _ = write!(text, "\n*Total:* ${:.2}\n\n", order.total);
    text.push_str("_Payment receipt and exact location attached here._");
    text
}

/// Link that opens a chat with `number` and `text` pre-filled.
///
/// Anything that is not a digit is stripped from the number, so `+54 9 11
/// 2233-4455` works as well as `5491122334455`.
///
/// # Errors
/// Returns a validation error if the number has no digits at all.
pub fn whatsapp_link(number: &str, text: &str) -> Result<Url> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(Error::Validation {
            field: "whatsapp_number",
            message: format!("'{number}' contains no digits"),
        });
    }

    let mut url = Url::parse(WHATSAPP_BASE_URL)
        .and_then(|base| base.join(&digits))
        .map_err(|e| Error::Config {
            message: format!("Failed to build messaging link: {e}"),
        })?;
    url.query_pairs_mut().append_pair("text", text);
    Ok(url)
}

/// Link handing `order` off to the store's contact number.
///
/// # Errors
/// See [`whatsapp_link`].
pub fn order_handoff_link(number: &str, order: &Order) -> Result<Url> {
    whatsapp_link(number, &order_message(order))
}
