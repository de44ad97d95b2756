//! Core BTN data structures.
//!
//! This crate provides definitions of core data structures for BTN, such as
//! amounts, block heights, and the consensus parameters of each network.

#![doc(html_root_url = "https://doc.btn.dev/btn_chain")]
// #![deny(missing_docs)]
#![allow(clippy::try_err)]

#[macro_use]
extern crate serde;

pub mod amount;
pub mod block;
pub mod parameters;
