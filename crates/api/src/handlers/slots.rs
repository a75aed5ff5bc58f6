//! Handlers for the `/slots` resource: the caller's own calendar.
//!
//! Owner-driven CRUD only. The swap engine is the sole writer of the
//! SWAP_PENDING status and of ownership changes; these handlers enforce
//! that by restricting owner edits to the BUSY/SWAPPABLE pair and by
//! consulting the delete guard.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use slotswap_core::error::CoreError;
use slotswap_core::slot;
use slotswap_core::types::DbId;
use slotswap_db::models::slot::{CreateSlot, Slot, UpdateSlot};
use slotswap_db::repositories::SlotRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/slots
///
/// List the caller's slots, ordered by start time ascending.
pub async fn list(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let slots = SlotRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: slots }))
}

/// POST /api/v1/slots
///
/// Create a slot. Status defaults to BUSY and must be owner-settable.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSlot>,
) -> AppResult<impl IntoResponse> {
    slot::validate_title(&input.title)?;
    slot::validate_time_window(input.start_time, input.end_time)?;

    let status = input.status.as_deref().unwrap_or(slot::STATUS_BUSY);
    slot::validate_owner_settable_status(status)?;

    let created = SlotRepo::create(&state.pool, auth.user_id, &input, status).await?;

    tracing::info!(user_id = auth.user_id, slot_id = created.id, "Slot created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/slots/{id}
///
/// Owner-only partial update. Rejected while the slot is locked into a
/// pending swap; status may only toggle between BUSY and SWAPPABLE.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSlot>,
) -> AppResult<impl IntoResponse> {
    let existing = load_owned_slot(&state, id, auth.user_id).await?;

    if !slot::is_owner_editable(&existing.status) {
        return Err(AppError::Core(CoreError::InvalidOperation(
            "Cannot edit a slot that is in a pending swap".into(),
        )));
    }

    if let Some(title) = &input.title {
        slot::validate_title(title)?;
    }
    if let Some(status) = &input.status {
        slot::validate_owner_settable_status(status)?;
    }

    // Validate the merged time window, not just the provided halves.
    let start_time = input.start_time.unwrap_or(existing.start_time);
    let end_time = input.end_time.unwrap_or(existing.end_time);
    slot::validate_time_window(start_time, end_time)?;

    // The write is conditional on the slot still being unpinned; a propose
    // landing between the checks above and this statement matches no row.
    let updated = SlotRepo::update(&state.pool, id, &input).await?.ok_or_else(|| {
        AppError::Core(CoreError::InvalidOperation(
            "Cannot edit a slot that is in a pending swap".into(),
        ))
    })?;

    tracing::info!(user_id = auth.user_id, slot_id = id, "Slot updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/slots/{id}
///
/// Owner-only; blocked by the delete guard while the slot is SWAP_PENDING.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = load_owned_slot(&state, id, auth.user_id).await?;

    if !slot::can_delete(&existing.status) {
        return Err(AppError::Core(CoreError::InvalidOperation(
            "Cannot delete a slot that is in a pending swap".into(),
        )));
    }

    // Same conditional-write pattern as update: a slot pinned after the
    // guard check above deletes no row.
    let deleted = SlotRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::InvalidOperation(
            "Cannot delete a slot that is in a pending swap".into(),
        )));
    }

    tracing::info!(user_id = auth.user_id, slot_id = id, "Slot deleted");

    Ok(Json(json!({ "message": "Slot deleted successfully" })))
}

/// Load a slot and verify the caller owns it.
async fn load_owned_slot(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Slot> {
    let existing = SlotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Slot",
            id,
        })?;

    if existing.user_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not authorized to modify this slot".into(),
        )));
    }

    Ok(existing)
}
