//! Block validity rules that depend on the block subsidy.

pub mod check;
pub mod subsidy;
