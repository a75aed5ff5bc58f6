//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods that must join an
//! enclosing transaction take `&mut PgConnection` instead.

pub mod slot_repo;
pub mod swap_repo;
pub mod user_repo;

pub use slot_repo::SlotRepo;
pub use swap_repo::SwapRepo;
pub use user_repo::UserRepo;
