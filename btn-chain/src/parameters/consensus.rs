//! The monetary schedule of a BTN network.

use std::convert::TryFrom;

use thiserror::Error;
use tracing::warn;

use crate::{
    amount::{Amount, NonNegative, COIN},
    block::Height,
};

/// The constants that define how much new currency each block may create.
///
/// The schedule has three parts:
///
/// 1. below `fork_height`, the primary subsidy halves every
///    `subsidy_halving_interval` blocks;
/// 2. for `premine_window` blocks starting at `fork_height`, every block pays
///    a flat `premine_subsidy`;
/// 3. afterwards, a new schedule starts at `secondary_subsidy` and halves
///    every `secondary_halving_interval` blocks.
///
/// # Invariants
///
/// A `ConsensusParams` can only be built by [`ConsensusParams::new`] (or by
/// deserializing, which calls it), so every value satisfies:
///
/// * both halving intervals are non-zero,
/// * the premine window ends at or before `Height::MAX`,
/// * the premine and secondary subsidies are valid nonnegative amounts.
///
/// Fields are never mutated after construction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ConsensusParamsFields")]
pub struct ConsensusParams {
    subsidy_halving_interval: u32,
    fork_height: Height,
    premine_window: u32,
    premine_subsidy: u64,
    secondary_subsidy: u64,
    secondary_halving_interval: u32,
}

/// The unvalidated serialized form of [`ConsensusParams`].
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConsensusParamsFields {
    subsidy_halving_interval: u32,
    fork_height: Height,
    premine_window: u32,
    premine_subsidy: u64,
    secondary_subsidy: u64,
    secondary_halving_interval: u32,
}

impl TryFrom<ConsensusParamsFields> for ConsensusParams {
    type Error = ParamsError;

    fn try_from(fields: ConsensusParamsFields) -> Result<Self, Self::Error> {
        ConsensusParams::new(
            fields.subsidy_halving_interval,
            fields.fork_height,
            fields.premine_window,
            fields.premine_subsidy,
            fields.secondary_subsidy,
            fields.secondary_halving_interval,
        )
    }
}

/// An invalid set of consensus parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("the subsidy halving interval must be greater than zero")]
    ZeroHalvingInterval,

    #[error("the secondary subsidy halving interval must be greater than zero")]
    ZeroSecondaryHalvingInterval,

    #[error("a premine window of {window} blocks starting at height {fork_height} ends after the maximum block height")]
    PremineWindowOverflow { fork_height: Height, window: u32 },

    #[error("a {name} of {coins} coins is outside the valid money range")]
    SubsidyOutOfRange { name: &'static str, coins: u64 },
}

impl ConsensusParams {
    /// Validates and returns a new set of consensus parameters.
    ///
    /// `premine_subsidy` and `secondary_subsidy` are whole coins.
    pub fn new(
        subsidy_halving_interval: u32,
        fork_height: Height,
        premine_window: u32,
        premine_subsidy: u64,
        secondary_subsidy: u64,
        secondary_halving_interval: u32,
    ) -> Result<Self, ParamsError> {
        let params = ConsensusParams {
            subsidy_halving_interval,
            fork_height,
            premine_window,
            premine_subsidy,
            secondary_subsidy,
            secondary_halving_interval,
        };

        params.validate().map_err(|error| {
            warn!(?params, %error, "rejected consensus parameters");
            error
        })?;

        Ok(params)
    }

    fn validate(&self) -> Result<(), ParamsError> {
        if self.subsidy_halving_interval == 0 {
            return Err(ParamsError::ZeroHalvingInterval);
        }

        if self.secondary_halving_interval == 0 {
            return Err(ParamsError::ZeroSecondaryHalvingInterval);
        }

        if self.fork_height.checked_add(self.premine_window).is_none() {
            return Err(ParamsError::PremineWindowOverflow {
                fork_height: self.fork_height,
                window: self.premine_window,
            });
        }

        coins_to_amount(self.premine_subsidy).ok_or(ParamsError::SubsidyOutOfRange {
            name: "premine subsidy",
            coins: self.premine_subsidy,
        })?;
        coins_to_amount(self.secondary_subsidy).ok_or(ParamsError::SubsidyOutOfRange {
            name: "secondary subsidy",
            coins: self.secondary_subsidy,
        })?;

        Ok(())
    }

    /// The number of blocks between halvings of the primary subsidy.
    pub fn subsidy_halving_interval(&self) -> u32 {
        self.subsidy_halving_interval
    }

    /// The first height of the premine window.
    pub fn fork_height(&self) -> Height {
        self.fork_height
    }

    /// The number of blocks in the premine window.
    pub fn premine_window(&self) -> u32 {
        self.premine_window
    }

    /// The flat premine payout, in whole coins.
    pub fn premine_subsidy(&self) -> u64 {
        self.premine_subsidy
    }

    /// The starting payout of the post-fork schedule, in whole coins.
    pub fn secondary_subsidy(&self) -> u64 {
        self.secondary_subsidy
    }

    /// The number of blocks between halvings of the post-fork schedule.
    pub fn secondary_halving_interval(&self) -> u32 {
        self.secondary_halving_interval
    }

    /// The first height after the premine window, where the secondary
    /// schedule starts.
    pub fn premine_end_height(&self) -> Height {
        self.fork_height
            .checked_add(self.premine_window)
            .expect("premine window end is checked when parameters are constructed")
    }

    /// The flat premine payout as an amount.
    pub fn premine_amount(&self) -> Amount<NonNegative> {
        coins_to_amount(self.premine_subsidy)
            .expect("premine subsidy is checked when parameters are constructed")
    }

    /// The starting payout of the secondary schedule as an amount.
    pub fn secondary_amount(&self) -> Amount<NonNegative> {
        coins_to_amount(self.secondary_subsidy)
            .expect("secondary subsidy is checked when parameters are constructed")
    }

    /// Returns true if `height` is inside the premine window.
    pub fn is_premine_height(&self, height: Height) -> bool {
        self.fork_height <= height && height < self.premine_end_height()
    }
}

/// Converts whole `coins` to an amount, if it fits in the money range.
fn coins_to_amount(coins: u64) -> Option<Amount<NonNegative>> {
    let value = i64::try_from(coins).ok()?.checked_mul(COIN)?;
    Amount::try_from(value).ok()
}
