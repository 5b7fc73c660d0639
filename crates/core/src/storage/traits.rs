use async_trait::async_trait;

use crate::item::{Item, ItemId, NewItem};

use super::Result;

/// Repository for item operations.
///
/// Each method is a single round trip to the store. Implementations rely on
/// the store's own concurrency control; callers get no ordering guarantee
/// between concurrent operations.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Lists every item in store-defined order.
    async fn list_items(&self) -> Result<Vec<Item>>;

    /// Persists a new item and returns it with its store-assigned ID.
    async fn create_item(&self, new_item: NewItem) -> Result<Item>;

    /// Deletes an item by its ID.
    ///
    /// Returns `Ok(false)` when no item matched, which is not an error.
    async fn delete_item(&self, id: ItemId) -> Result<bool>;
}
