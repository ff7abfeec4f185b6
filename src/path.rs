use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Every valid path lives under this marker.
pub const ROOT_MARKER: &str = "/home/";
pub const SEPARATOR: char = '/';

/// An absolute location in the remote tree.
///
/// Whether a path names a directory is decided purely by syntax: directories end
/// with [`SEPARATOR`]. No normalisation is done; the store hands back well-formed
/// children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct VfsPath(String);

impl VfsPath {
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.starts_with(ROOT_MARKER) {
            Ok(VfsPath(raw))
        } else {
            Err(Error::InvalidPath(raw))
        }
    }

    pub fn root() -> Self {
        VfsPath(ROOT_MARKER.to_string())
    }

    pub fn is_dir(&self) -> bool {
        self.0.ends_with(SEPARATOR)
    }

    /// The part after the root marker, as used in the remote endpoint (`/home/a/b` -> `a/b`).
    pub fn remote_segments(&self) -> &str {
        &self.0[ROOT_MARKER.len()..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for VfsPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        VfsPath::parse(s)
    }
}

impl TryFrom<String> for VfsPath {
    type Error = Error;

    fn try_from(raw: String) -> Result<Self> {
        VfsPath::parse(raw)
    }
}

impl AsRef<str> for VfsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
