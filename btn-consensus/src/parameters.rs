//! The consensus parameters for each BTN network.
//!
//! Network-specific values live in `btn_chain::parameters`; this module
//! holds the constants shared by every network.

pub mod subsidy;

pub use subsidy::*;
