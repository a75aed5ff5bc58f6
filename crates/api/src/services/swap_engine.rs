//! The swap negotiation engine.
//!
//! Validates and executes the pairwise slot exchange: proposing a swap,
//! listing a user's incoming/outgoing requests, and responding to a
//! pending request.
//!
//! Every mutating operation runs as a single PostgreSQL transaction. The
//! involved slot rows are taken with `SELECT ... FOR UPDATE` in ascending
//! id order, so concurrent calls touching the same slots serialize and
//! each one evaluates its preconditions against a consistent snapshot.
//! An early return rolls the transaction back; either the full set of
//! writes commits or none do.

use slotswap_core::error::CoreError;
use slotswap_core::types::DbId;
use slotswap_core::{slot, swap};
use sqlx::PgPool;

use slotswap_db::models::slot::Slot;
use slotswap_db::models::swap_request::SwapRequestDetail;
use slotswap_db::repositories::{SlotRepo, SwapRepo};

use crate::error::{AppError, AppResult};

/// Orchestrates swap request state transitions across slots and requests.
pub struct SwapEngine;

impl SwapEngine {
    /// Propose exchanging `offered_slot_id` for `target_slot_id`.
    ///
    /// Preconditions, checked in order against locked rows:
    /// 1. both slots exist,
    /// 2. the requester owns the offered slot,
    /// 3. the target slot belongs to someone else,
    /// 4. the offered slot is SWAPPABLE,
    /// 5. the target slot is SWAPPABLE.
    ///
    /// On success both slots move to SWAP_PENDING and a PENDING request is
    /// created, all in one transaction. Pinning both slots at proposal
    /// time is what stops a slot from being offered into two concurrent
    /// swaps.
    pub async fn propose(
        pool: &PgPool,
        requester_user_id: DbId,
        offered_slot_id: DbId,
        target_slot_id: DbId,
    ) -> AppResult<SwapRequestDetail> {
        let mut tx = pool.begin().await?;

        let slots = SlotRepo::lock_pair(&mut *tx, offered_slot_id, target_slot_id).await?;
        let offered = find_slot(&slots, offered_slot_id).ok_or(CoreError::NotFound {
            entity: "Slot",
            id: offered_slot_id,
        })?;
        let target = find_slot(&slots, target_slot_id).ok_or(CoreError::NotFound {
            entity: "Slot",
            id: target_slot_id,
        })?;

        if offered.user_id != requester_user_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "You do not own the offered slot".into(),
            )));
        }

        if target.user_id == requester_user_id {
            return Err(AppError::Core(CoreError::InvalidOperation(
                "Cannot swap with your own slot".into(),
            )));
        }

        if !slot::is_swappable(&offered.status) {
            return Err(AppError::Core(CoreError::InvalidOperation(
                "Your slot must be SWAPPABLE".into(),
            )));
        }

        if !slot::is_swappable(&target.status) {
            return Err(AppError::Core(CoreError::InvalidOperation(
                "Target slot is not available for swap".into(),
            )));
        }

        let request = SwapRepo::create_locked(
            &mut *tx,
            offered.id,
            target.id,
            requester_user_id,
            target.user_id,
        )
        .await?;
        SlotRepo::set_status_locked(&mut *tx, offered.id, slot::STATUS_SWAP_PENDING).await?;
        SlotRepo::set_status_locked(&mut *tx, target.id, slot::STATUS_SWAP_PENDING).await?;

        tx.commit().await?;

        tracing::info!(
            request_id = request.id,
            requester_id = requester_user_id,
            offered_slot_id,
            target_slot_id,
            "Swap proposed"
        );

        Self::load_detail(pool, request.id).await
    }

    /// Accept or reject a pending request as its target user.
    ///
    /// Accepting exchanges the two slots' owners and sets both BUSY;
    /// rejecting releases both back to SWAPPABLE. If either referenced
    /// slot was deleted or mutated out-of-band since the proposal, the
    /// operation fails closed with [`CoreError::Conflict`] and writes
    /// nothing.
    pub async fn respond(
        pool: &PgPool,
        request_id: DbId,
        responder_user_id: DbId,
        accepted: bool,
    ) -> AppResult<SwapRequestDetail> {
        let mut tx = pool.begin().await?;

        let request = SwapRepo::find_by_id_locked(&mut *tx, request_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "SwapRequest",
                id: request_id,
            })?;

        if request.target_user_id != responder_user_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Not authorized to respond to this swap".into(),
            )));
        }

        let next_status = if accepted {
            swap::STATUS_ACCEPTED
        } else {
            swap::STATUS_REJECTED
        };
        swap::validate_transition(&request.status, next_status)?;

        // A PENDING request must still reference both slots; the delete
        // guard makes losing one impossible unless it was bypassed.
        let (Some(requester_slot_id), Some(target_slot_id)) =
            (request.requester_slot_id, request.target_slot_id)
        else {
            return Err(AppError::Core(CoreError::Conflict(
                "Swap request no longer references both slots".into(),
            )));
        };

        let slots = SlotRepo::lock_pair(&mut *tx, requester_slot_id, target_slot_id).await?;
        let requester_slot = find_slot(&slots, requester_slot_id);
        let target_slot = find_slot(&slots, target_slot_id);
        let (Some(requester_slot), Some(target_slot)) = (requester_slot, target_slot) else {
            return Err(AppError::Core(CoreError::Conflict(
                "A referenced slot no longer exists".into(),
            )));
        };

        let consistent = requester_slot.status == slot::STATUS_SWAP_PENDING
            && target_slot.status == slot::STATUS_SWAP_PENDING
            && requester_slot.user_id == request.requester_id
            && target_slot.user_id == request.target_user_id;
        if !consistent {
            return Err(AppError::Core(CoreError::Conflict(
                "Slots were modified since the swap was proposed".into(),
            )));
        }

        if accepted {
            SlotRepo::set_owner_and_status_locked(
                &mut *tx,
                requester_slot.id,
                request.target_user_id,
                slot::STATUS_BUSY,
            )
            .await?;
            SlotRepo::set_owner_and_status_locked(
                &mut *tx,
                target_slot.id,
                request.requester_id,
                slot::STATUS_BUSY,
            )
            .await?;
        } else {
            SlotRepo::set_status_locked(&mut *tx, requester_slot.id, slot::STATUS_SWAPPABLE)
                .await?;
            SlotRepo::set_status_locked(&mut *tx, target_slot.id, slot::STATUS_SWAPPABLE).await?;
        }
        SwapRepo::set_status_locked(&mut *tx, request.id, next_status).await?;

        tx.commit().await?;

        tracing::info!(
            request_id = request.id,
            responder_id = responder_user_id,
            accepted,
            "Swap request resolved"
        );

        Self::load_detail(pool, request.id).await
    }

    /// PENDING requests addressed to `user_id`, newest first, with slots
    /// and the requester's identity resolved.
    pub async fn list_incoming(pool: &PgPool, user_id: DbId) -> AppResult<Vec<SwapRequestDetail>> {
        let rows = SwapRepo::list_incoming(pool, user_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Everything `user_id` has proposed (any status), newest first, with
    /// slots and the target's identity resolved.
    pub async fn list_outgoing(pool: &PgPool, user_id: DbId) -> AppResult<Vec<SwapRequestDetail>> {
        let rows = SwapRepo::list_outgoing(pool, user_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Load the decorated projection of a request after a state change.
    async fn load_detail(pool: &PgPool, request_id: DbId) -> AppResult<SwapRequestDetail> {
        let row = SwapRepo::find_detail_by_id(pool, request_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "SwapRequest",
                id: request_id,
            })?;
        Ok(row.into())
    }
}

/// Pick a slot out of the locked pair by id.
fn find_slot(slots: &[Slot], id: DbId) -> Option<&Slot> {
    slots.iter().find(|s| s.id == id)
}
