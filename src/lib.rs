//! Gatehouse - editor gateway for the club website
//!
//! The site is a set of static HTML pages kept in a GitHub repository.
//! Gatehouse exposes the two endpoints the in-browser editor talks to:
//!
//! ## Services
//!
//! - **Content Store Gateway** (`/api/github`): reads an allow-listed page
//!   with its revision token, and commits new content conditioned on it
//! - **Edit Instruction Translator** (`/api/prompt`): asks a hosted chat
//!   completion model to apply a plain-language edit to a page and checks
//!   that what comes back is still a whole HTML document
//!
//! The browser orchestrates the two: read, translate, then write back with
//! the token from the read. The gateways never call each other and keep no
//! state between requests.

pub mod auth;
pub mod config;
pub mod content;
pub mod editor;
pub mod logging;
pub mod routes;
pub mod server;
pub mod types;

pub use config::Args;
pub use server::{route, run, AppState};
pub use types::{GatewayError, Result};
