use serde::Deserialize;

use crate::error::{Error, Result};
use crate::path::VfsPath;

/// MIME type the store reports for directories.
pub const DIRECTORY_MIME: &str = "inode/directory";

/// One entry of a directory listing, as returned by the store.
///
/// All fields are required; extra fields sent by the store are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Node {
    pub path: VfsPath,
    pub name: String,
    pub href: String,
    pub crtime: String,
    pub mtime: String,
    pub mime: String,
    pub size: u64,
}

impl Node {
    /// Children are classified by their MIME type, never by their path.
    pub fn is_dir(&self) -> bool {
        self.mime == DIRECTORY_MIME
    }
}

/// Snapshot of a listing, nodes kept in the order the store sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    pub path: VfsPath,
    pub nodes: Vec<Node>,
}

impl Directory {
    pub fn decode(path: VfsPath, body: &[u8]) -> Result<Self> {
        let nodes = serde_json::from_slice::<Vec<Node>>(body).map_err(|source| Error::Decode {
            path: path.to_string(),
            source,
        })?;
        Ok(Directory { path, nodes })
    }
}
