//! Slot status constants and state-machine rules.
//!
//! A slot is a bookable calendar interval owned by one user. Its status
//! moves through a small state machine:
//!
//! ```text
//! BUSY <-> SWAPPABLE          (owner-driven, free)
//! SWAPPABLE -> SWAP_PENDING   (swap proposed, either side)
//! SWAP_PENDING -> BUSY        (swap accepted)
//! SWAP_PENDING -> SWAPPABLE   (swap rejected)
//! ```
//!
//! SWAP_PENDING is reserved for the swap engine: a slot in that state can
//! not be edited, deleted, or offered into a second swap by its owner.

use crate::error::CoreError;
use crate::types::Timestamp;

/// The slot is booked and not offered for exchange.
pub const STATUS_BUSY: &str = "BUSY";

/// The owner has offered the slot for exchange.
pub const STATUS_SWAPPABLE: &str = "SWAPPABLE";

/// The slot is locked into a pending swap negotiation.
pub const STATUS_SWAP_PENDING: &str = "SWAP_PENDING";

/// All valid slot status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_BUSY, STATUS_SWAPPABLE, STATUS_SWAP_PENDING];

/// Statuses an owner may set directly (on create or update).
pub const OWNER_SETTABLE_STATUSES: &[&str] = &[STATUS_BUSY, STATUS_SWAPPABLE];

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid slot status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Validate a status an owner is setting directly.
///
/// Owners toggle BUSY <-> SWAPPABLE freely; only the swap engine may move a
/// slot into SWAP_PENDING.
pub fn validate_owner_settable_status(status: &str) -> Result<(), CoreError> {
    validate_status(status)?;
    if OWNER_SETTABLE_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::InvalidOperation(
            "Slots cannot be moved into SWAP_PENDING directly".to_string(),
        ))
    }
}

/// Validate that a slot's title is non-empty after trimming.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        Err(CoreError::Validation("Title is required".to_string()))
    } else {
        Ok(())
    }
}

/// Validate that a slot's end time is strictly after its start time.
///
/// Enforced at every creation and mutation; the database CHECK constraint
/// is only a backstop.
pub fn validate_time_window(start_time: Timestamp, end_time: Timestamp) -> Result<(), CoreError> {
    if end_time > start_time {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "End time must be after start time".to_string(),
        ))
    }
}

/// Delete guard: a slot may be deleted only while it is not locked into a
/// pending swap.
pub fn can_delete(status: &str) -> bool {
    status != STATUS_SWAP_PENDING
}

/// Whether a slot in this status may be offered into (or targeted by) a
/// new swap proposal.
pub fn is_swappable(status: &str) -> bool {
    status == STATUS_SWAPPABLE
}

/// Whether the owner may edit a slot in this status.
pub fn is_owner_editable(status: &str) -> bool {
    status != STATUS_SWAP_PENDING
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    #[test]
    fn test_all_statuses_valid() {
        for status in VALID_STATUSES {
            assert!(validate_status(status).is_ok());
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert_matches!(validate_status("FREE"), Err(CoreError::Validation(_)));
        assert_matches!(validate_status(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_owner_may_set_busy_and_swappable() {
        assert!(validate_owner_settable_status(STATUS_BUSY).is_ok());
        assert!(validate_owner_settable_status(STATUS_SWAPPABLE).is_ok());
    }

    #[test]
    fn test_owner_may_not_set_swap_pending() {
        assert_matches!(
            validate_owner_settable_status(STATUS_SWAP_PENDING),
            Err(CoreError::InvalidOperation(_))
        );
    }

    #[test]
    fn test_title_must_be_non_empty() {
        assert!(validate_title("Morning shift").is_ok());
        assert_matches!(validate_title(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_title("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_end_must_be_after_start() {
        let start = Utc::now();
        assert!(validate_time_window(start, start + Duration::hours(1)).is_ok());
        assert_matches!(
            validate_time_window(start, start),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_time_window(start, start - Duration::minutes(1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_delete_guard_blocks_only_swap_pending() {
        assert!(can_delete(STATUS_BUSY));
        assert!(can_delete(STATUS_SWAPPABLE));
        assert!(!can_delete(STATUS_SWAP_PENDING));
    }

    #[test]
    fn test_only_swappable_slots_enter_negotiation() {
        assert!(is_swappable(STATUS_SWAPPABLE));
        assert!(!is_swappable(STATUS_BUSY));
        assert!(!is_swappable(STATUS_SWAP_PENDING));
    }

    #[test]
    fn test_swap_pending_is_not_owner_editable() {
        assert!(is_owner_editable(STATUS_BUSY));
        assert!(is_owner_editable(STATUS_SWAPPABLE));
        assert!(!is_owner_editable(STATUS_SWAP_PENDING));
    }
}
