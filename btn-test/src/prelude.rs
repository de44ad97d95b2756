//! Common imports for BTN tests.

pub use crate::init;

pub use color_eyre::eyre::{bail, ensure, eyre, Report, Result};
pub use proptest::prelude::*;
