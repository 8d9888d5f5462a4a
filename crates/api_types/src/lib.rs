//! HTTP wire types for the attendance tracker API.
//!
//! Request and response bodies shared by the server and its clients. Input
//! validation lives here too, so a client can pre-check a form with exactly
//! the rules the server applies.

mod input;
mod requests;
mod responses;

pub use input::*;
pub use requests::*;
pub use responses::*;
