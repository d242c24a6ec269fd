//! Shopping cart module.
//!
//! Contains line items, add-to-cart drafts and the cart store.

mod item;
mod store;

pub use item::{CartLineItem, LineDraft, LineKey, MAX_QUANTITY_PER_ITEM};
pub use store::{CartStore, SharedCart};
