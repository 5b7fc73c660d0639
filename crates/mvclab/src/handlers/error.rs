use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use mvclab_core::storage::RepositoryError;

/// Request-scoped controller failures.
///
/// Each variant renders as a 500 with a fixed plain-text body naming the
/// failed operation. The underlying cause is logged, never sent.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Error fetching items")]
    Fetch(#[source] RepositoryError),
    #[error("Error saving item")]
    Save(#[source] RepositoryError),
    #[error("Error deleting item")]
    Delete(#[source] RepositoryError),
}

impl ControllerError {
    fn cause(&self) -> &RepositoryError {
        match self {
            Self::Fetch(err) | Self::Save(err) | Self::Delete(err) => err,
        }
    }
}

impl IntoResponse for ControllerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.cause(), "{}", self);

        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
