//! Slot entity model and DTOs.

use serde::{Deserialize, Serialize};
use slotswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// A row from the `slots` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Slot {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new slot. `status` defaults to BUSY when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSlot {
    pub title: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub status: Option<String>,
}

/// DTO for updating an existing slot. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSlot {
    pub title: Option<String>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub status: Option<String>,
}

/// Flat joined row: a slot together with its owner's identity columns.
#[derive(Debug, Clone, FromRow)]
pub struct SlotWithOwnerRow {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub owner_name: String,
    pub owner_email: String,
}

/// A slot with its owner's identity resolved, as served by the
/// marketplace listing.
#[derive(Debug, Clone, Serialize)]
pub struct SlotWithOwner {
    #[serde(flatten)]
    pub slot: Slot,
    pub owner: UserSummary,
}

impl From<SlotWithOwnerRow> for SlotWithOwner {
    fn from(row: SlotWithOwnerRow) -> Self {
        Self {
            owner: UserSummary {
                id: row.user_id,
                name: row.owner_name,
                email: row.owner_email,
            },
            slot: Slot {
                id: row.id,
                user_id: row.user_id,
                title: row.title,
                start_time: row.start_time,
                end_time: row.end_time,
                status: row.status,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}
