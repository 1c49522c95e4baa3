//! Authorization for Gatehouse
//!
//! The editor is gated by one shared secret sent in the `X-Admin-Token`
//! header. There are no users or roles.

pub mod admin_token;

pub use admin_token::{verify_admin_token, AdminTokenValidator, ADMIN_TOKEN_HEADER};
