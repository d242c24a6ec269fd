use super::repository::{WishlistEntry, WishlistRepository};
use crate::catalog::CatalogProvider;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::notify::Notifier;
use std::fmt;
use std::sync::Arc;

/// Saved products, rehydrated on open and written back after each change.
///
/// Writes are whole-set and last-write-wins; two processes sharing one
/// store overwrite each other.
pub struct WishlistStore {
    items: Vec<WishlistEntry>,
    repository: Box<dyn WishlistRepository>,
    catalog: Option<Arc<dyn CatalogProvider>>,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WishlistStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl WishlistStore {
    /// Open the store, loading whatever the repository holds.
    ///
    /// Unreadable data is logged and the store starts empty.
    pub fn open(repository: impl WishlistRepository + 'static, notifier: Arc<dyn Notifier>) -> Self {
        let items = match repository.load() {
            Ok(entries) => dedupe(entries),
            Err(e) => {
                tracing::warn!(error = %e, "could not load wishlist, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = items.len(), "wishlist rehydrated");

        Self {
            items,
            repository: Box::new(repository),
            catalog: None,
            notifier,
        }
    }

    /// Use `catalog` to put product names in notices.
    pub fn with_catalog(mut self, catalog: Arc<dyn CatalogProvider>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn items(&self) -> &[WishlistEntry] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_in_wishlist(&self, id: &ProductId) -> bool {
        self.items.iter().any(|e| &e.id == id)
    }

    /// Save a product. Returns `Ok(false)` if it was already saved.
    pub fn add_item(&mut self, id: &ProductId) -> Result<bool, CommerceError> {
        if self.is_in_wishlist(id) {
            self.notifier.info("Item already in wishlist");
            return Ok(false);
        }

        self.items.push(WishlistEntry { id: id.clone() });
        tracing::info!(product_id = %id, "added to wishlist");
        self.persist()?;
        self.notifier
            .success(&format!("Added {} to wishlist", self.label(id)));
        Ok(true)
    }

    /// Drop a product. Returns whether it was saved.
    pub fn remove_item(&mut self, id: &ProductId) -> Result<bool, CommerceError> {
        let before = self.items.len();
        self.items.retain(|e| &e.id != id);
        if self.items.len() == before {
            return Ok(false);
        }

        tracing::info!(product_id = %id, "removed from wishlist");
        self.persist()?;
        self.notifier
            .success(&format!("Removed {} from wishlist", self.label(id)));
        Ok(true)
    }

    pub fn clear_wishlist(&mut self) -> Result<(), CommerceError> {
        self.items.clear();
        tracing::info!("cleared wishlist");
        self.persist()?;
        self.notifier.success("Wishlist cleared");
        Ok(())
    }

    fn persist(&self) -> Result<(), CommerceError> {
        self.repository.save(&self.items).map_err(|e| {
            tracing::warn!(error = %e, "could not save wishlist");
            self.notifier.error("Could not save your wishlist");
            match e {
                CommerceError::Storage(_) => e,
                other => CommerceError::Storage(other.to_string()),
            }
        })
    }

    fn label(&self, id: &ProductId) -> String {
        self.catalog
            .as_ref()
            .and_then(|c| c.get_product_by_id(id))
            .map(|p| p.name)
            .unwrap_or_else(|| "item".to_string())
    }
}

fn dedupe(entries: Vec<WishlistEntry>) -> Vec<WishlistEntry> {
    let mut seen = std::collections::HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(e.id.clone()))
        .collect()
}
