//! Swap request entity model and joined detail projections.

use serde::Serialize;
use slotswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::slot::Slot;
use crate::models::user::UserSummary;

/// A row from the `swap_requests` table.
///
/// Slot references are `Option` because the FK columns are nullable: a
/// terminal request keeps its history even after a referenced slot is
/// deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SwapRequest {
    pub id: DbId,
    pub requester_slot_id: Option<DbId>,
    pub target_slot_id: Option<DbId>,
    pub requester_id: DbId,
    pub target_user_id: DbId,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Flat joined row backing [`SwapRequestDetail`].
///
/// Slot columns are aliased `rs_*` (requester slot) and `ts_*` (target
/// slot) and are all `Option` since the joins are LEFT joins.
#[derive(Debug, Clone, FromRow)]
pub struct SwapRequestDetailRow {
    pub id: DbId,
    pub requester_id: DbId,
    pub target_user_id: DbId,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    pub rs_id: Option<DbId>,
    pub rs_user_id: Option<DbId>,
    pub rs_title: Option<String>,
    pub rs_start_time: Option<Timestamp>,
    pub rs_end_time: Option<Timestamp>,
    pub rs_status: Option<String>,
    pub rs_created_at: Option<Timestamp>,
    pub rs_updated_at: Option<Timestamp>,

    pub ts_id: Option<DbId>,
    pub ts_user_id: Option<DbId>,
    pub ts_title: Option<String>,
    pub ts_start_time: Option<Timestamp>,
    pub ts_end_time: Option<Timestamp>,
    pub ts_status: Option<String>,
    pub ts_created_at: Option<Timestamp>,
    pub ts_updated_at: Option<Timestamp>,

    pub requester_name: String,
    pub requester_email: String,
    pub target_name: String,
    pub target_email: String,
}

/// A swap request with both slots and both user identities resolved, as
/// returned by propose, respond, and the incoming/outgoing listings.
#[derive(Debug, Clone, Serialize)]
pub struct SwapRequestDetail {
    pub id: DbId,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub requester_slot: Option<Slot>,
    pub target_slot: Option<Slot>,
    pub requester: UserSummary,
    pub target_user: UserSummary,
}

/// Assemble a [`Slot`] from one aliased column group, if the join matched.
#[allow(clippy::too_many_arguments)]
fn slot_from_columns(
    id: Option<DbId>,
    user_id: Option<DbId>,
    title: Option<String>,
    start_time: Option<Timestamp>,
    end_time: Option<Timestamp>,
    status: Option<String>,
    created_at: Option<Timestamp>,
    updated_at: Option<Timestamp>,
) -> Option<Slot> {
    match (
        id, user_id, title, start_time, end_time, status, created_at, updated_at,
    ) {
        (
            Some(id),
            Some(user_id),
            Some(title),
            Some(start_time),
            Some(end_time),
            Some(status),
            Some(created_at),
            Some(updated_at),
        ) => Some(Slot {
            id,
            user_id,
            title,
            start_time,
            end_time,
            status,
            created_at,
            updated_at,
        }),
        _ => None,
    }
}

impl From<SwapRequestDetailRow> for SwapRequestDetail {
    fn from(row: SwapRequestDetailRow) -> Self {
        Self {
            id: row.id,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            requester_slot: slot_from_columns(
                row.rs_id,
                row.rs_user_id,
                row.rs_title,
                row.rs_start_time,
                row.rs_end_time,
                row.rs_status,
                row.rs_created_at,
                row.rs_updated_at,
            ),
            target_slot: slot_from_columns(
                row.ts_id,
                row.ts_user_id,
                row.ts_title,
                row.ts_start_time,
                row.ts_end_time,
                row.ts_status,
                row.ts_created_at,
                row.ts_updated_at,
            ),
            requester: UserSummary {
                id: row.requester_id,
                name: row.requester_name,
                email: row.requester_email,
            },
            target_user: UserSummary {
                id: row.target_user_id,
                name: row.target_name,
                email: row.target_email,
            },
        }
    }
}
