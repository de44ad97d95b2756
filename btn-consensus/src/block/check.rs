//! Consensus check functions

use btn_chain::{
    amount::{Amount, NonNegative},
    block::Height,
    parameters::ConsensusParams,
};

use crate::error::*;

use super::subsidy;

/// Returns `Ok(())` if a coinbase paying `coinbase_value` at `height` creates
/// no more than the block subsidy plus `fees`.
///
/// The coinbase may claim less than it is owed. Any unclaimed value is
/// destroyed.
pub fn subsidy_is_valid(
    height: Height,
    coinbase_value: Amount<NonNegative>,
    fees: Amount<NonNegative>,
    params: &ConsensusParams,
) -> Result<(), BlockError> {
    let subsidy = subsidy::general::block_subsidy(height, params);
    let max_value = (subsidy + fees).map_err(SubsidyError::from)?;

    if coinbase_value > max_value {
        Err(SubsidyError::CoinbaseValueTooHigh {
            height,
            coinbase_value,
            max_value,
        })?;
    }

    Ok(())
}
