//! Route definitions for the `/swaps` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::swaps;
use crate::state::AppState;

/// Routes mounted at `/swaps`.
///
/// ```text
/// GET  /swappable-slots          -> list_swappable_slots
/// POST /requests                 -> propose
/// GET  /requests/incoming        -> list_incoming
/// GET  /requests/outgoing        -> list_outgoing
/// POST /requests/{id}/response   -> respond
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/swappable-slots", get(swaps::list_swappable_slots))
        .route("/requests", post(swaps::propose))
        .route("/requests/incoming", get(swaps::list_incoming))
        .route("/requests/outgoing", get(swaps::list_outgoing))
        .route("/requests/{id}/response", post(swaps::respond))
}
