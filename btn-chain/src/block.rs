//! Block-related structures.
//!
//! Only block heights live here: headers and transactions are owned by the
//! block validation pipeline that consumes this crate.

mod height;

pub use height::Height;
