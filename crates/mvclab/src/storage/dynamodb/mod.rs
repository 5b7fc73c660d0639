//! DynamoDB storage backend implementation.
//!
//! Items live in a single table keyed by the string attribute `id`.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbRepository;
