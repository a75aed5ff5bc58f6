//! Route definitions for the `/slots` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::slots;
use crate::state::AppState;

/// Routes mounted at `/slots`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(slots::list).post(slots::create))
        .route("/{id}", put(slots::update).delete(slots::delete))
}
