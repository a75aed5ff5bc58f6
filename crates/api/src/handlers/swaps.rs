//! Handlers for the `/swaps` resource: marketplace and swap negotiation.
//!
//! Thin plumbing over [`SwapEngine`]; validation and the transactional
//! state transitions live in the engine.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use slotswap_core::types::DbId;
use slotswap_db::models::slot::SlotWithOwner;
use slotswap_db::repositories::SlotRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::services::swap_engine::SwapEngine;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /swaps/requests`.
#[derive(Debug, Deserialize)]
pub struct ProposeSwapRequest {
    pub offered_slot_id: DbId,
    pub target_slot_id: DbId,
}

/// Request body for `POST /swaps/requests/{id}/response`.
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub accepted: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/swaps/swappable-slots
///
/// Marketplace: SWAPPABLE slots from all other users, owner identity
/// resolved, ordered by start time.
pub async fn list_swappable_slots(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = SlotRepo::list_swappable_excluding(&state.pool, auth.user_id).await?;
    let slots: Vec<SlotWithOwner> = rows.into_iter().map(Into::into).collect();
    Ok(Json(DataResponse { data: slots }))
}

/// POST /api/v1/swaps/requests
///
/// Propose a swap: offer one of the caller's slots for another user's slot.
pub async fn propose(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ProposeSwapRequest>,
) -> AppResult<impl IntoResponse> {
    let detail = SwapEngine::propose(
        &state.pool,
        auth.user_id,
        input.offered_slot_id,
        input.target_slot_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/swaps/requests/incoming
///
/// PENDING requests addressed to the caller, newest first.
pub async fn list_incoming(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests = SwapEngine::list_incoming(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/swaps/requests/outgoing
///
/// Everything the caller has proposed (any status), newest first.
pub async fn list_outgoing(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests = SwapEngine::list_outgoing(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// POST /api/v1/swaps/requests/{id}/response
///
/// Accept or reject a pending swap request as its target user.
pub async fn respond(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<RespondRequest>,
) -> AppResult<impl IntoResponse> {
    let detail = SwapEngine::respond(&state.pool, request_id, auth.user_id, input.accepted).await?;
    Ok(Json(DataResponse { data: detail }))
}
