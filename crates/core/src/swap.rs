//! Swap request status constants and transition rules.
//!
//! A swap request is a proposal to exchange two slots between two users.
//! PENDING is the only live state; ACCEPTED and REJECTED are terminal and
//! immutable.

use crate::error::CoreError;

/// The request awaits a response from the target user.
pub const STATUS_PENDING: &str = "PENDING";

/// The target user accepted; slot ownership was exchanged.
pub const STATUS_ACCEPTED: &str = "ACCEPTED";

/// The target user declined; both slots returned to SWAPPABLE.
pub const STATUS_REJECTED: &str = "REJECTED";

/// All valid swap request status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_ACCEPTED, STATUS_REJECTED];

/// Whether a status is terminal (no further transitions allowed).
pub fn is_terminal(status: &str) -> bool {
    status == STATUS_ACCEPTED || status == STATUS_REJECTED
}

/// Validate a request status transition.
///
/// The only legal transitions are PENDING -> ACCEPTED and
/// PENDING -> REJECTED.
pub fn validate_transition(from: &str, to: &str) -> Result<(), CoreError> {
    if from == STATUS_PENDING && (to == STATUS_ACCEPTED || to == STATUS_REJECTED) {
        Ok(())
    } else if is_terminal(from) {
        Err(CoreError::InvalidOperation(
            "Swap request has already been processed".to_string(),
        ))
    } else {
        Err(CoreError::InvalidOperation(format!(
            "Illegal swap request transition: {from} -> {to}"
        )))
    }
}
