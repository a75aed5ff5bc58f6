//! Repository for the `slots` table.
//!
//! Plain reads and owner CRUD take `&PgPool`. The `*_locked` methods join
//! the swap engine's transaction and take `&mut PgConnection`; they are the
//! only write path for the SWAP_PENDING status and for ownership changes.

use slotswap_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::slot::{CreateSlot, Slot, SlotWithOwnerRow, UpdateSlot};

/// Column list for slots queries.
const COLUMNS: &str = "id, user_id, title, start_time, end_time, status, created_at, updated_at";

/// Provides CRUD operations for calendar slots.
pub struct SlotRepo;

impl SlotRepo {
    /// Insert a new slot, returning the created row.
    ///
    /// `status` has already been validated by the caller against the
    /// owner-settable set.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateSlot,
        status: &str,
    ) -> Result<Slot, sqlx::Error> {
        let query = format!(
            "INSERT INTO slots (user_id, title, start_time, end_time, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Slot>(&query)
            .bind(user_id)
            .bind(input.title.trim())
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Find a slot by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Slot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slots WHERE id = $1");
        sqlx::query_as::<_, Slot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all slots owned by a user, ordered by start time ascending.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Slot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM slots
             WHERE user_id = $1
             ORDER BY start_time ASC"
        );
        sqlx::query_as::<_, Slot>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Marketplace listing: SWAPPABLE slots owned by anyone except
    /// `user_id`, with owner identity resolved, ordered by start time.
    pub async fn list_swappable_excluding(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SlotWithOwnerRow>, sqlx::Error> {
        sqlx::query_as::<_, SlotWithOwnerRow>(
            "SELECT
                s.id, s.user_id, s.title, s.start_time, s.end_time, s.status,
                s.created_at, s.updated_at,
                u.name AS owner_name, u.email AS owner_email
             FROM slots s
             JOIN users u ON u.id = s.user_id
             WHERE s.status = 'SWAPPABLE'
               AND s.user_id <> $1
             ORDER BY s.start_time ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Partially update a slot, returning the updated row.
    ///
    /// Absent fields keep their current value. Ownership and state-machine
    /// checks happen in the handler before this is called, but the write
    /// itself re-checks the status: a slot pinned into SWAP_PENDING between
    /// the handler's read and this statement matches no row and the pin
    /// survives. Returns `None` when no unpinned row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSlot,
    ) -> Result<Option<Slot>, sqlx::Error> {
        let query = format!(
            "UPDATE slots SET
                title = COALESCE($2, title),
                start_time = COALESCE($3, start_time),
                end_time = COALESCE($4, end_time),
                status = COALESCE($5, status),
                updated_at = now()
             WHERE id = $1 AND status <> 'SWAP_PENDING'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Slot>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.status.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a slot unless it is locked into a pending swap. Returns
    /// whether a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM slots WHERE id = $1 AND status <> 'SWAP_PENDING'")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lock and load up to two slots inside the caller's transaction.
    ///
    /// Rows are locked in ascending id order so concurrent engine calls
    /// over the same pair cannot deadlock. Missing ids simply produce
    /// fewer rows; the caller decides what absence means.
    pub async fn lock_pair(
        conn: &mut PgConnection,
        first_id: DbId,
        second_id: DbId,
    ) -> Result<Vec<Slot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM slots
             WHERE id IN ($1, $2)
             ORDER BY id ASC
             FOR UPDATE"
        );
        sqlx::query_as::<_, Slot>(&query)
            .bind(first_id)
            .bind(second_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Set a slot's status inside the caller's transaction.
    pub async fn set_status_locked(
        conn: &mut PgConnection,
        id: DbId,
        status: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE slots SET status = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Reassign a slot's owner and set its status inside the caller's
    /// transaction. Only an accepted swap goes through here.
    pub async fn set_owner_and_status_locked(
        conn: &mut PgConnection,
        id: DbId,
        user_id: DbId,
        status: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE slots SET user_id = $2, status = $3, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(user_id)
        .bind(status)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
