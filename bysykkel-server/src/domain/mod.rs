//! Core domain types for the station map.
//!
//! These types are independent of the upstream feed format; the
//! `gbfs` module converts wire data into them via the reconciler.

mod display;
mod station;

pub use display::{DisplayMode, InvalidDisplayMode};
pub use station::ReconciledStation;
