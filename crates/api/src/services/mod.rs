//! Application services orchestrating multi-record operations.

pub mod swap_engine;
