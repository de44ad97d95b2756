//! Block subsidies, halvings and the premine window.

pub mod general;
