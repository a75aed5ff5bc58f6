pub mod auth;
pub mod health;
pub mod slots;
pub mod swaps;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                      register (public)
/// /auth/login                         login (public)
///
/// /slots                              list, create
/// /slots/{id}                         update, delete
///
/// /swaps/swappable-slots              marketplace listing
/// /swaps/requests                     propose
/// /swaps/requests/incoming            incoming pending requests
/// /swaps/requests/outgoing            outgoing requests
/// /swaps/requests/{id}/response       accept / reject
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/slots", slots::router())
        .nest("/swaps", swaps::router())
}
