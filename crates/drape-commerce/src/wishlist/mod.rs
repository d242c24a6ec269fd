//! Wishlist module.
//!
//! A unique set of saved product ids, persisted after every change.

mod repository;
mod store;

pub use repository::{KvWishlistRepository, WishlistEntry, WishlistRepository, WISHLIST_KEY};
pub use store::WishlistStore;
