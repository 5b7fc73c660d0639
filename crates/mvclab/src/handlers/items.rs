//! Item controller.
//!
//! Each handler performs one store round trip, then either renders the
//! list view or redirects back to `/`.

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use mvclab_core::item::{ItemId, NewItem};

use crate::{
    handlers::ControllerError,
    state::AppState,
    views::{HtmlTemplate, IndexTemplate},
};

/// Form payload for `POST /add`.
#[derive(Debug, Deserialize)]
pub struct AddItemForm {
    pub name: Option<String>,
}

/// 302 back to the list page.
fn back_to_list() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

/// Render every item (GET /).
pub async fn list_items(State(state): State<AppState>) -> Result<Response, ControllerError> {
    let items = state
        .items
        .list_items()
        .await
        .map_err(ControllerError::Fetch)?;

    Ok(HtmlTemplate(IndexTemplate { items }).into_response())
}

/// Create an item from the submitted form (POST /add).
///
/// A missing or empty `name` is not an error: nothing is stored and the
/// user is sent back to the list.
pub async fn add_item(
    State(state): State<AppState>,
    form: Result<Form<AddItemForm>, FormRejection>,
) -> Result<Response, ControllerError> {
    let submitted = match form {
        Ok(Form(form)) => form.name,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable add form");
            None
        }
    };

    let Some(new_item) = NewItem::from_submission(submitted) else {
        tracing::debug!("No name submitted, nothing to add");
        return Ok(back_to_list());
    };

    let item = state
        .items
        .create_item(new_item)
        .await
        .map_err(ControllerError::Save)?;

    tracing::info!(item_id = %item.id, name = %item.name, "Created item");

    Ok(back_to_list())
}

/// Delete an item by ID (POST /delete/{id}).
///
/// Deleting an ID that is not in the store is a no-op. A malformed ID
/// counts as a failed delete.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ControllerError> {
    let id: ItemId = id.parse().map_err(ControllerError::Delete)?;

    let removed = state
        .items
        .delete_item(id)
        .await
        .map_err(ControllerError::Delete)?;

    if removed {
        tracing::info!(item_id = %id, "Deleted item");
    } else {
        tracing::debug!(item_id = %id, "No item to delete");
    }

    Ok(back_to_list())
}
