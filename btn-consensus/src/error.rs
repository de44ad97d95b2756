//! Errors that can occur when checking consensus rules.
//!
//! Each error variant corresponds to a consensus rule, so enumerating
//! all possible verification failures enumerates the consensus rules we
//! implement, and ensures that we don't reject blocks or transactions
//! for a non-enumerated reason.

use thiserror::Error;

use btn_chain::{
    amount::{self, Amount, NonNegative},
    block::Height,
};

/// A block subsidy rule was violated.
#[derive(Error, Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SubsidyError {
    /// The coinbase creates more value than the subsidy and fees allow.
    #[error("coinbase at height {height} creates {coinbase_value}, but at most {max_value} is allowed")]
    CoinbaseValueTooHigh {
        height: Height,
        coinbase_value: Amount<NonNegative>,
        max_value: Amount<NonNegative>,
    },

    /// The block subsidy plus fees is not a valid amount.
    #[error("block subsidy plus fees is outside the valid money range")]
    Amount(#[from] amount::Error),
}

/// A block failed a subsidy-dependent validity check.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    /// The block's coinbase value is invalid.
    #[error("invalid block subsidy")]
    Subsidy(#[from] SubsidyError),
}
