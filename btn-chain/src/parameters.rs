//! Consensus parameters for each BTN network.
//!
//! This module contains the consensus parameters which are required for
//! computing the block subsidy, and for selecting them by network.

mod consensus;
mod network;

pub use consensus::{ConsensusParams, ParamsError};
pub use network::{InvalidNetworkError, Network};
