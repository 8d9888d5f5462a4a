//! Attendance record storage.
//!
//! This crate provides a storage abstraction for user accounts and their
//! attendance records. It ships an in-memory store (tests and ephemeral
//! runs) and a SQLite store (persistent deployments).

mod error;
mod memory;
mod sqlite;
mod traits;

pub use error::*;
pub use memory::*;
pub use sqlite::*;
pub use traits::*;
