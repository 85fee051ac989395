//! Conversion of angles between the decimal degrees
//! and the Degree-Minute-Second notation.
//!
//! All the functions here are pure: no state is kept between the calls.

mod consts;
pub mod dd;
pub mod dms;

pub use consts::{DEFAULT_DD_PRECISION, DEFAULT_SECONDS_PRECISION, MAX_PRECISION};
