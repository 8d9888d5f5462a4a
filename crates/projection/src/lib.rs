//! Attendance projection engine.
//!
//! Pure functions that turn a class tally into an attendance percentage and
//! the number of consecutive attended classes required to reach a target.
//! Both the server and clients call into this crate so the numbers are
//! computed one way everywhere.

mod calculator;
mod error;
mod needed;
mod tally;

pub use calculator::*;
pub use error::*;
pub use needed::*;
pub use tally::*;

/// Percentage below which a record is considered at risk.
pub const LOWER_THRESHOLD: u8 = 75;

/// Percentage at or above which a record is considered safe.
pub const UPPER_THRESHOLD: u8 = 85;
