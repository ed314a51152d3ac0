//! Adapter implementations for list and task ports.

pub mod memory;
pub mod postgres;
