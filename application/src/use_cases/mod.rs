//! Use cases

pub mod deliberate;
