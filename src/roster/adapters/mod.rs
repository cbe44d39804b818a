//! Adapter implementations for roster ports.

pub mod memory;
pub mod postgres;
