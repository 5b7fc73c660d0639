//! In-memory storage backend.
//!
//! Keeps items in a `Vec` behind `Arc<RwLock<_>>`. Useful for tests and for
//! running the demo without a database; data is lost when the process exits.

mod repository;

pub use repository::InMemoryRepository;
