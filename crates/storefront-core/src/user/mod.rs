//! User domain module.
//!
//! The remote service owns the profile shape; the client relies on `role`
//! for access-control checks and keeps everything else verbatim.

mod model;

pub use model::UserProfile;
