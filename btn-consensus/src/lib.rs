//! Consensus rules for BTN.
//!
//! This crate computes the block subsidy permitted at each height, checks
//! coinbase values against it, and provides [`signal::Signal`], an owned set
//! of subscribers whose boolean answers are combined into one decision.

#![doc(html_root_url = "https://doc.btn.dev/btn_consensus")]
#![deny(missing_docs)]
#![allow(clippy::try_err)]

pub mod block;
pub mod error;
pub mod parameters;
pub mod signal;

pub use block::subsidy::general::block_subsidy;
pub use signal::{Combiner, CombinerAll, Signal, SubscriberId, ValidationSignal};
