//! Operations behind the API handlers.
//!
//! Each function takes the store and the caller's identity explicitly, so the
//! same logic runs under HTTP handlers and in tests without a router.

pub mod accounts;
pub mod attendance;
pub mod timetable;
