//! Domain logic for the slot-swap platform.
//!
//! Pure validation and state-machine rules shared by the DB and API layers.
//! No I/O lives here.

pub mod error;
pub mod slot;
pub mod swap;
pub mod types;
