//! Shared application state.

use std::sync::Arc;

use mvclab_core::storage::ItemRepository;

/// State handed to every request handler.
///
/// Holds the store handle created once by the bootstrap; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemRepository>,
}

impl AppState {
    pub fn new(items: Arc<dyn ItemRepository>) -> Self {
        Self { items }
    }
}

#[cfg(feature = "inmemory")]
impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(crate::storage::inmemory::InMemoryRepository::new()))
    }
}
