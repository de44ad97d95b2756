//! Block subsidy calculations for the primary halving schedule, the premine
//! window, and the secondary halving schedule that follows it.

use std::convert::TryFrom;

use serde::Serialize;
use tracing::trace;

use btn_chain::{
    amount::{self, Amount, NonNegative},
    block::Height,
    parameters::ConsensusParams,
};

use crate::parameters::subsidy::*;

/// The part of the subsidy schedule that governs a block height.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubsidyRegime {
    /// Heights below the fork height.
    ///
    /// The subsidy starts at `MAX_BLOCK_SUBSIDY` and halves every
    /// `subsidy_halving_interval` blocks.
    Primary,
    /// Heights in `[fork_height, fork_height + premine_window)`, which all
    /// pay the flat premine subsidy.
    Premine,
    /// Heights at or after the end of the premine window.
    ///
    /// The subsidy starts at the secondary subsidy and halves every
    /// `secondary_halving_interval` blocks, counted from the end of the
    /// premine window.
    Secondary,
}

impl SubsidyRegime {
    /// Returns the regime that governs `height` under `params`.
    pub fn current(height: Height, params: &ConsensusParams) -> SubsidyRegime {
        if height < params.fork_height() {
            SubsidyRegime::Primary
        } else if height < params.premine_end_height() {
            SubsidyRegime::Premine
        } else {
            SubsidyRegime::Secondary
        }
    }

    /// Returns the first height governed by this regime.
    ///
    /// If the premine window is empty, the premine regime activates and ends
    /// at the same height, so it never becomes current.
    pub fn activation_height(&self, params: &ConsensusParams) -> Height {
        match self {
            SubsidyRegime::Primary => Height(0),
            SubsidyRegime::Premine => params.fork_height(),
            SubsidyRegime::Secondary => params.premine_end_height(),
        }
    }
}

/// Returns the number of halvings applied to the subsidy at `height`.
///
/// Primary halvings are counted from the genesis block, and secondary
/// halvings from the end of the premine window. Heights inside the premine
/// window are never halved, so they return `None`.
pub fn halvings(height: Height, params: &ConsensusParams) -> Option<u32> {
    match SubsidyRegime::current(height, params) {
        SubsidyRegime::Primary => Some(height.0 / params.subsidy_halving_interval()),
        SubsidyRegime::Premine => None,
        SubsidyRegime::Secondary => Some(
            (height.0 - params.premine_end_height().0) / params.secondary_halving_interval(),
        ),
    }
}

/// `initial` halved `halvings` times, or zero once the schedule is exhausted.
fn halved(initial: Amount<NonNegative>, halvings: u32) -> Amount<NonNegative> {
    if halvings >= SUBSIDY_EXHAUSTED_HALVINGS {
        return Amount::zero();
    }

    initial.halve(halvings)
}

/// Returns the block subsidy for `height` under `params`.
///
/// `block_subsidy` is defined for every height, and the result is always
/// inside the money range.
pub fn block_subsidy(height: Height, params: &ConsensusParams) -> Amount<NonNegative> {
    let regime = SubsidyRegime::current(height, params);

    let subsidy = match regime {
        SubsidyRegime::Primary => {
            let max_block_subsidy = Amount::try_from(MAX_BLOCK_SUBSIDY)
                .expect("the primary subsidy is a valid amount");
            halved(max_block_subsidy, height.0 / params.subsidy_halving_interval())
        }
        SubsidyRegime::Premine => params.premine_amount(),
        SubsidyRegime::Secondary => {
            let blocks_since_premine = height.0 - params.premine_end_height().0;
            halved(
                params.secondary_amount(),
                blocks_since_premine / params.secondary_halving_interval(),
            )
        }
    };

    trace!(?height, ?regime, %subsidy, "block subsidy");

    subsidy
}

/// Returns the lowest height above `height` where the subsidy can change.
///
/// Returns `None` if the subsidy at `height` holds for every greater valid
/// height.
pub fn next_subsidy_change(height: Height, params: &ConsensusParams) -> Option<Height> {
    subsidy_change_after(height, params)
        .and_then(|next| u32::try_from(next).ok())
        .map(Height)
        .filter(|next| *next <= Height::MAX)
}

/// Like [`next_subsidy_change`], but without the `Height::MAX` cap, so runs
/// above the maximum height still end at their halvings.
fn subsidy_change_after(height: Height, params: &ConsensusParams) -> Option<u64> {
    let next = match SubsidyRegime::current(height, params) {
        SubsidyRegime::Primary => {
            let interval = u64::from(params.subsidy_halving_interval());
            let halvings = u64::from(height.0) / interval;
            let fork_height = u64::from(params.fork_height().0);

            if halvings >= u64::from(SUBSIDY_EXHAUSTED_HALVINGS) {
                fork_height
            } else {
                ((halvings + 1) * interval).min(fork_height)
            }
        }
        SubsidyRegime::Premine => u64::from(params.premine_end_height().0),
        SubsidyRegime::Secondary => {
            let start = u64::from(params.premine_end_height().0);
            let interval = u64::from(params.secondary_halving_interval());
            let halvings = (u64::from(height.0) - start) / interval;

            if halvings >= u64::from(SUBSIDY_EXHAUSTED_HALVINGS) {
                return None;
            }

            start + (halvings + 1) * interval
        }
    };

    Some(next)
}

/// One run of consecutive heights that all pay the same subsidy.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SubsidyPeriod {
    /// The first height in the run.
    pub start: Height,
    /// The regime at `start`.
    pub regime: SubsidyRegime,
    /// The subsidy paid by every block in the run.
    pub subsidy: Amount<NonNegative>,
}

/// Returns the subsidy schedule as runs of equal subsidies, from the genesis
/// block up to `Height::MAX`.
///
/// A run ends where the subsidy changes value, so halvings that round to the
/// same amount are merged. The last run covers every remaining height.
pub fn subsidy_schedule(params: &ConsensusParams) -> Vec<SubsidyPeriod> {
    let mut schedule: Vec<SubsidyPeriod> = Vec::new();
    let mut height = Some(Height(0));

    while let Some(start) = height {
        let subsidy = block_subsidy(start, params);
        let regime = SubsidyRegime::current(start, params);

        match schedule.last() {
            Some(last) if last.subsidy == subsidy => {}
            _ => schedule.push(SubsidyPeriod {
                start,
                regime,
                subsidy,
            }),
        }

        height = next_subsidy_change(start, params);
    }

    schedule
}

/// Returns the total subsidy paid by the blocks in `[0, end)`.
///
/// `end` may be above `Height::MAX`. Returns an error if the running total
/// leaves the money range.
pub fn total_supply(
    end: Height,
    params: &ConsensusParams,
) -> Result<Amount<NonNegative>, amount::Error> {
    let mut total = Amount::zero();
    let mut height = Height(0);

    while height < end {
        // `end` is a u32, so the run end fits in one.
        let run_end = subsidy_change_after(height, params)
            .map_or(end, |next| Height(next.min(u64::from(end.0)) as u32));
        let blocks = u64::from(run_end.0 - height.0);

        // Totals only grow, so checking each run's total checks every
        // height's running total.
        total = (total + (block_subsidy(height, params) * blocks)?)?;
        height = run_end;
    }

    Ok(total)
}
