//! Type-safe key-value storage for the Drape storefront.
//!
//! Provides a small, ergonomic API for keeping data in a durable local
//! store with automatic JSON serialization. The storefront uses it for the
//! persisted wishlist and for recording placed orders.
//!
//! # Example
//!
//! ```rust
//! use drape_cache::{Cache, MemoryBackend};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Entry {
//!     id: String,
//! }
//!
//! let cache = Cache::new(MemoryBackend::new());
//!
//! cache.set("wishlist", &vec![Entry { id: "5".into() }]).unwrap();
//!
//! let saved: Option<Vec<Entry>> = cache.get("wishlist").unwrap();
//! assert_eq!(saved.unwrap()[0].id, "5");
//!
//! cache.delete("wishlist").unwrap();
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileBackend, KvBackend, MemoryBackend};
}
