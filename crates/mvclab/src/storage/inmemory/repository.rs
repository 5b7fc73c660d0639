//! In-memory repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use mvclab_core::item::{Item, ItemId, NewItem};
use mvclab_core::storage::{ItemRepository, Result};

/// In-memory item store.
///
/// Items are kept in insertion order, which is the order `list_items`
/// returns them in.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    items: Arc<RwLock<Vec<Item>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn list_items(&self) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items.clone())
    }

    async fn create_item(&self, new_item: NewItem) -> Result<Item> {
        let item = Item::create(new_item);
        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn delete_item(&self, id: ItemId) -> Result<bool> {
        let mut items = self.items.write().await;
        match items.iter().position(|item| item.id == id) {
            Some(index) => {
                items.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(name: &str) -> NewItem {
        NewItem::from_submission(Some(name.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_list_empty() {
        let repo = InMemoryRepository::new();
        assert!(repo.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_keeps_insertion_order() {
        let repo = InMemoryRepository::new();

        repo.create_item(new_item("Milk")).await.unwrap();
        repo.create_item(new_item("Eggs")).await.unwrap();
        repo.create_item(new_item("Milk")).await.unwrap();

        let names: Vec<String> = repo
            .list_items()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect();

        assert_eq!(names, vec!["Milk", "Eggs", "Milk"]);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let repo = InMemoryRepository::new();

        let milk = repo.create_item(new_item("Milk")).await.unwrap();
        let eggs = repo.create_item(new_item("Eggs")).await.unwrap();

        assert!(repo.delete_item(milk.id).await.unwrap());

        let items = repo.list_items().await.unwrap();
        assert_eq!(items, vec![eggs]);
    }

    #[tokio::test]
    async fn test_delete_missing_reports_false() {
        let repo = InMemoryRepository::new();
        repo.create_item(new_item("Milk")).await.unwrap();

        assert!(!repo.delete_item(ItemId::generate()).await.unwrap());
        assert_eq!(repo.list_items().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_twice_matches_delete_once() {
        let repo = InMemoryRepository::new();
        let milk = repo.create_item(new_item("Milk")).await.unwrap();
        repo.create_item(new_item("Bread")).await.unwrap();

        assert!(repo.delete_item(milk.id).await.unwrap());
        let after_once = repo.list_items().await.unwrap();

        assert!(!repo.delete_item(milk.id).await.unwrap());
        assert_eq!(repo.list_items().await.unwrap(), after_once);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryRepository::new();
        let clone = repo.clone();

        clone.create_item(new_item("Tea")).await.unwrap();

        assert_eq!(repo.list_items().await.unwrap().len(), 1);
    }
}
