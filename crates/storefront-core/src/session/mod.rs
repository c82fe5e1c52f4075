//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the `Session` state plus login request/response payloads

mod model;

pub use model::{Credentials, LoginResponse, Session};
