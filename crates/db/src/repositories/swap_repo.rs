//! Repository for the `swap_requests` table.

use slotswap_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::swap_request::{SwapRequest, SwapRequestDetailRow};

/// Column list for swap_requests queries.
const COLUMNS: &str = "id, requester_slot_id, target_slot_id, requester_id, \
    target_user_id, status, created_at, updated_at";

/// Column list for the joined detail projection.
///
/// Slots are LEFT-joined because their FK columns are nullable; the two
/// user joins are inner joins (users are never deleted out from under a
/// request except by account cascade, which removes the request too).
const DETAIL_COLUMNS: &str = "sr.id, sr.requester_id, sr.target_user_id, sr.status, \
    sr.created_at, sr.updated_at, \
    rs.id AS rs_id, rs.user_id AS rs_user_id, rs.title AS rs_title, \
    rs.start_time AS rs_start_time, rs.end_time AS rs_end_time, rs.status AS rs_status, \
    rs.created_at AS rs_created_at, rs.updated_at AS rs_updated_at, \
    ts.id AS ts_id, ts.user_id AS ts_user_id, ts.title AS ts_title, \
    ts.start_time AS ts_start_time, ts.end_time AS ts_end_time, ts.status AS ts_status, \
    ts.created_at AS ts_created_at, ts.updated_at AS ts_updated_at, \
    ru.name AS requester_name, ru.email AS requester_email, \
    tu.name AS target_name, tu.email AS target_email";

/// Shared FROM clause for detail queries.
const DETAIL_FROM: &str = "FROM swap_requests sr \
    LEFT JOIN slots rs ON rs.id = sr.requester_slot_id \
    LEFT JOIN slots ts ON ts.id = sr.target_slot_id \
    JOIN users ru ON ru.id = sr.requester_id \
    JOIN users tu ON tu.id = sr.target_user_id";

/// Provides operations for swap request records.
pub struct SwapRepo;

impl SwapRepo {
    /// Insert a new PENDING request inside the caller's transaction.
    pub async fn create_locked(
        conn: &mut PgConnection,
        requester_slot_id: DbId,
        target_slot_id: DbId,
        requester_id: DbId,
        target_user_id: DbId,
    ) -> Result<SwapRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO swap_requests
                (requester_slot_id, target_slot_id, requester_id, target_user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SwapRequest>(&query)
            .bind(requester_slot_id)
            .bind(target_slot_id)
            .bind(requester_id)
            .bind(target_user_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Lock and load a request by id inside the caller's transaction.
    pub async fn find_by_id_locked(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<SwapRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM swap_requests WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, SwapRequest>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Set a request's status inside the caller's transaction.
    pub async fn set_status_locked(
        conn: &mut PgConnection,
        id: DbId,
        status: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE swap_requests SET status = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Load one request with slots and user identities resolved.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SwapRequestDetailRow>, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} {DETAIL_FROM} WHERE sr.id = $1");
        sqlx::query_as::<_, SwapRequestDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// PENDING requests addressed to a user, newest first.
    pub async fn list_incoming(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SwapRequestDetailRow>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE sr.target_user_id = $1 AND sr.status = 'PENDING'
             ORDER BY sr.created_at DESC"
        );
        sqlx::query_as::<_, SwapRequestDetailRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All requests a user has proposed (any status), newest first.
    pub async fn list_outgoing(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SwapRequestDetailRow>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE sr.requester_id = $1
             ORDER BY sr.created_at DESC"
        );
        sqlx::query_as::<_, SwapRequestDetailRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
