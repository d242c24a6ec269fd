use crate::error::CommerceError;
use crate::ids::ProductId;
use drape_cache::Cache;
use serde::{Deserialize, Serialize};

/// Storage key holding the wishlist.
pub const WISHLIST_KEY: &str = "wishlist";

/// A saved product. Serialized as `{"id": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: ProductId,
}

impl WishlistEntry {
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self { id: id.into() }
    }
}

/// Durable storage for the wishlist.
pub trait WishlistRepository: Send + Sync {
    /// Load the saved entries. A missing wishlist is empty.
    fn load(&self) -> Result<Vec<WishlistEntry>, CommerceError>;

    /// Replace the saved entries.
    fn save(&self, entries: &[WishlistEntry]) -> Result<(), CommerceError>;
}

/// Wishlist stored as a JSON array under one key of a [`Cache`].
#[derive(Debug, Clone)]
pub struct KvWishlistRepository {
    cache: Cache,
    key: String,
}

impl KvWishlistRepository {
    pub fn new(cache: Cache) -> Self {
        Self::with_key(cache, WISHLIST_KEY)
    }

    pub fn with_key(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }
}

impl WishlistRepository for KvWishlistRepository {
    fn load(&self) -> Result<Vec<WishlistEntry>, CommerceError> {
        Ok(self.cache.get(&self.key)?.unwrap_or_default())
    }

    fn save(&self, entries: &[WishlistEntry]) -> Result<(), CommerceError> {
        self.cache.set(&self.key, entries)?;
        Ok(())
    }
}
