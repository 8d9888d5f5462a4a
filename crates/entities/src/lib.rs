//! Core entity definitions for the attendance tracker.
//!
//! This crate defines the data types shared by the record store and the
//! server: attendance records with their mark history, user accounts and
//! weekly timetables.

mod record;
mod timetable;
mod user;

pub use record::*;
pub use timetable::*;
pub use user::*;
