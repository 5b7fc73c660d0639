//! Item store backends and the startup connector.
//!
//! The backend is selected at compile time via feature flags:
//!
//! - `inmemory` (default): process-local store, accepts `memory://` URLs
//! - `dynamodb`: AWS DynamoDB via `aws-sdk-dynamodb`, accepts an endpoint
//!   URL (`http://localhost:8000` for DynamoDB Local) or `dynamodb://` to
//!   use the default AWS endpoint
//!
//! These features are mutually exclusive.
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p mvclab --no-default-features --features dynamodb
//! ```

use std::sync::Arc;

use thiserror::Error;
use url::Url;

use mvclab_core::storage::{ItemRepository, RepositoryError};

use crate::config::Config;

#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb' feature. \
    Example: cargo build -p mvclab --features inmemory"
);

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

/// Database URL used when neither `--database-url` nor `DATABASE_URL` is set.
#[cfg(feature = "inmemory")]
pub const DEFAULT_DATABASE_URL: &str = "memory://local";

/// Database URL used when neither `--database-url` nor `DATABASE_URL` is set.
#[cfg(feature = "dynamodb")]
pub const DEFAULT_DATABASE_URL: &str = "http://localhost:8000";

/// Errors raised while establishing the store connection at startup.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Invalid database URL: {0}")]
    InvalidUri(#[from] url::ParseError),
    #[error("Unsupported database URL scheme {scheme:?}, expected {expected}")]
    UnsupportedScheme {
        scheme: String,
        expected: &'static str,
    },
    #[error("Item store unreachable: {0}")]
    Unreachable(#[from] RepositoryError),
}

/// Connects to the item store described by `uri`.
///
/// Called once at startup. The returned handle is shared by every request
/// for the life of the process.
pub async fn connect(
    uri: &str,
    config: &Config,
) -> Result<Arc<dyn ItemRepository>, ConnectionError> {
    let url = Url::parse(uri)?;

    tracing::debug!(scheme = url.scheme(), "Connecting to item store");

    connect_backend(&url, config).await
}

#[cfg(feature = "inmemory")]
async fn connect_backend(
    url: &Url,
    _config: &Config,
) -> Result<Arc<dyn ItemRepository>, ConnectionError> {
    match url.scheme() {
        "memory" => {
            tracing::info!("Using in-memory item store, data is lost on exit");
            Ok(Arc::new(inmemory::InMemoryRepository::new()))
        }
        scheme => Err(ConnectionError::UnsupportedScheme {
            scheme: scheme.to_string(),
            expected: "memory://",
        }),
    }
}

#[cfg(feature = "dynamodb")]
async fn connect_backend(
    url: &Url,
    config: &Config,
) -> Result<Arc<dyn ItemRepository>, ConnectionError> {
    let endpoint_url = match url.scheme() {
        "http" | "https" => Some(url.as_str().trim_end_matches('/').to_string()),
        "dynamodb" => None,
        scheme => {
            return Err(ConnectionError::UnsupportedScheme {
                scheme: scheme.to_string(),
                expected: "http://, https:// or dynamodb://",
            })
        }
    };

    let repo =
        dynamodb::DynamoDbRepository::connect(endpoint_url, &config.dynamodb_table_name).await?;

    tracing::info!(table = repo.table_name(), "Connected to DynamoDB item store");

    Ok(Arc::new(repo))
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;
    use crate::config::LogFormat;

    fn test_config() -> Config {
        Config {
            dynamodb_table_name: "items".to_string(),
            log_format: LogFormat::Pretty,
        }
    }

    #[tokio::test]
    async fn test_connect_memory_url_yields_empty_store() {
        let repo = connect("memory://local", &test_config()).await.unwrap();
        assert!(repo.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connect_rejects_unparsable_url() {
        let result = connect("not a url", &test_config()).await;
        assert!(matches!(result, Err(ConnectionError::InvalidUri(_))));
    }

    #[tokio::test]
    async fn test_connect_rejects_foreign_scheme() {
        let result = connect("mongodb://localhost:27017/items", &test_config()).await;

        match result {
            Err(ConnectionError::UnsupportedScheme { scheme, .. }) => {
                assert_eq!(scheme, "mongodb");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected connection to fail"),
        }
    }
}
