//! # TileFit Core
//!
//! Core types and utilities shared by the TileFit crates.
//! Provides the common error type, the engine defaults, and the length
//! units used to convert user-facing values into document points.

pub mod error;
pub mod limits;
pub mod units;

pub use error::{Error, Result};
pub use units::{format_length, parse_length, LengthUnit, POINTS_PER_INCH};
