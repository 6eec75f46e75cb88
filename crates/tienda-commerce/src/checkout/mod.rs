//! Checkout module.
//!
//! Derives the checkout page from a cart snapshot and builds the pre-filled
//! messaging link that stands in for order submission.

mod order_link;
mod view;

pub use order_link::{order_link, OrderLine, OrderLinks, DEFAULT_CONTACT_PHONE};
pub use view::{
    storage_notice, CheckoutLine, CheckoutView, EMPTY_CART_MESSAGE, FALLBACK_PRODUCT_NAME,
    STORAGE_UNAVAILABLE_WARNING,
};
