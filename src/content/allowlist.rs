//! Editable page allow-list
//!
//! A closed set: the editor can touch these six pages and nothing else.
//! Membership is an exact string match on the file name, with no
//! normalisation, so `./index.html` or `INDEX.HTML` are simply not members.

use std::fmt;
use std::str::FromStr;

use crate::types::GatewayError;

/// Error text for any path outside the allow-list
pub const NOT_ALLOWED: &str = "File not allowed for editing";

/// A page the editor is allowed to read and write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditableFile {
    Index,
    Admin,
    Gotsport,
    Coaching,
    Conduct,
    Medical,
}

impl EditableFile {
    pub const ALL: [EditableFile; 6] = [
        EditableFile::Index,
        EditableFile::Admin,
        EditableFile::Gotsport,
        EditableFile::Coaching,
        EditableFile::Conduct,
        EditableFile::Medical,
    ];

    /// Repository path of the page
    pub fn path(self) -> &'static str {
        match self {
            EditableFile::Index => "index.html",
            EditableFile::Admin => "admin.html",
            EditableFile::Gotsport => "gotsport.html",
            EditableFile::Coaching => "coaching.html",
            EditableFile::Conduct => "conduct.html",
            EditableFile::Medical => "medical.html",
        }
    }

    /// Look a path up in the allow-list
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|file| file.path() == path)
    }
}

impl FromStr for EditableFile {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s)
            .ok_or_else(|| GatewayError::Forbidden(NOT_ALLOWED.to_string()))
    }
}

impl fmt::Display for EditableFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
