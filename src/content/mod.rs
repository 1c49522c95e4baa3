//! Content Store Gateway
//!
//! Reads and commits the site's editable pages in the GitHub repository.
//!
//! ```text
//! Browser ──GET /api/github?file=──▶ ContentGateway ──GET contents──▶ GitHub
//!         ◀── {content, sha, path} ──                ◀── base64 + sha ──
//!
//! Browser ──POST /api/github──────▶ ContentGateway ──PUT contents───▶ GitHub
//!         ◀── {success, sha, url} ──                 ◀── new sha ───────
//! ```
//!
//! The revision token (`sha`) is GitHub's optimistic-concurrency check: a
//! commit carrying a superseded sha is refused upstream and that refusal is
//! passed back unchanged.

pub mod allowlist;
pub mod gateway;
pub mod github;
pub mod store;

pub use allowlist::EditableFile;
pub use gateway::{ContentGateway, FileSnapshot, WriteReceipt, WriteRequest};
pub use github::GitHubStore;
pub use store::{Commit, CommitReceipt, ContentStore, StoreError, StoredFile};
