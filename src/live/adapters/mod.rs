//! Adapter implementations of live ports.

pub mod memory;
