//! Constants for the block subsidy schedule.

use btn_chain::amount::{COIN, MAX_HALVINGS};

/// The largest block subsidy of the primary schedule, used before its first
/// halving. 50 BTN
pub const MAX_BLOCK_SUBSIDY: i64 = 50 * COIN;

/// Any schedule that has halved this many times pays nothing.
pub const SUBSIDY_EXHAUSTED_HALVINGS: u32 = MAX_HALVINGS;
