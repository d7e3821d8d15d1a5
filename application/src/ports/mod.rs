//! Ports (interfaces) for external adapters
//!
//! Implementations live in the outer layers.

pub mod progress;
