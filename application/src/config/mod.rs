//! Application-level configuration.
//!
//! - [`DeliberationParams`] - detection sensitivity, synthesis settings and
//!   the confidence domain for one deliberation

pub mod deliberation_params;

pub use deliberation_params::DeliberationParams;
