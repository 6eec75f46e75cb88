//! Shopping cart module.
//!
//! [`CartManager`] is the single owner of cart state. Everything else sees
//! the cart only through [`CartSnapshot`] copies, delivered on demand or to
//! subscribed observers after every change.

mod item;
mod manager;
mod observer;
mod persisted;

pub use item::{CartItem, CartSnapshot};
pub use manager::{CartManager, DEFAULT_STORAGE_KEY};
pub use observer::Subscription;
