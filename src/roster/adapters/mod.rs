//! Adapter implementations of roster ports.

pub mod memory;
