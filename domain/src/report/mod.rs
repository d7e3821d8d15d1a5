//! Derived, stateless report views over a perspective set

pub mod dissent;
pub mod tradeoff;

pub use dissent::{DissentReport, Dissenter};
pub use tradeoff::{RiskLevel, TradeoffEntry, TradeoffMatrix, tradeoff_summaries};
