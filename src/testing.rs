// In-memory tree store for unit tests. Counts every call it receives.
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::client::TreeStoreClient;
use crate::error::{Error, Result};
use crate::node::{DIRECTORY_MIME, Directory, Node};
use crate::path::VfsPath;

#[derive(Default)]
pub struct FakeStore {
    directories: HashMap<VfsPath, Vec<Node>>,
    files: RefCell<HashMap<VfsPath, Vec<u8>>>,
    failing_status: Cell<Option<u16>>,
    list_calls: Cell<usize>,
    read_calls: Cell<usize>,
}

impl FakeStore {
    pub fn new() -> Self {
        FakeStore::default()
    }

    pub fn with_directory(mut self, path: &str, nodes: Vec<Node>) -> Self {
        self.directories.insert(vfs(path), nodes);
        self
    }

    pub fn with_file(self, path: &str, content: &[u8]) -> Self {
        self.replace_file(path, content);
        self
    }

    pub fn replace_file(&self, path: &str, content: &[u8]) {
        self.files.borrow_mut().insert(vfs(path), content.to_vec());
    }

    /// Every later call answers with this HTTP status.
    pub fn fail_with_status(&self, status: u16) {
        self.failing_status.set(Some(status));
    }

    pub fn node(&self, dir: &str, name: &str) -> Node {
        self.directories[&vfs(dir)]
            .iter()
            .find(|node| node.name == name)
            .cloned()
            .unwrap_or_else(|| panic!("no node {name} in {dir}"))
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls.get()
    }

    fn check_failure(&self, path: &VfsPath) -> Result<()> {
        match self.failing_status.get() {
            Some(status) => Err(Error::HttpStatus {
                status,
                url: format!("fake://{}", path.remote_segments()),
            }),
            None => Ok(()),
        }
    }
}

impl TreeStoreClient for FakeStore {
    fn list_directory(&self, path: &VfsPath) -> Result<Directory> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.check_failure(path)?;
        match self.directories.get(path) {
            Some(nodes) => Ok(Directory {
                path: path.clone(),
                nodes: nodes.clone(),
            }),
            None if self.files.borrow().contains_key(path) => {
                Err(Error::NotADirectory(path.to_string()))
            }
            None => Err(Error::HttpStatus {
                status: 404,
                url: format!("fake://{}", path.remote_segments()),
            }),
        }
    }

    fn read_file(&self, path: &VfsPath) -> Result<Vec<u8>> {
        self.read_calls.set(self.read_calls.get() + 1);
        self.check_failure(path)?;
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| Error::HttpStatus {
                status: 404,
                url: format!("fake://{}", path.remote_segments()),
            })
    }
}

fn vfs(raw: &str) -> VfsPath {
    VfsPath::parse(raw).unwrap()
}

pub fn dir_node(name: &str, path: &str) -> Node {
    Node {
        path: vfs(path),
        name: name.to_string(),
        href: format!("https://site.scm/api/vfs/{}", &path[6..]),
        crtime: "2024-01-01T00:00:00+00:00".to_string(),
        mtime: "2024-01-02T00:00:00+00:00".to_string(),
        mime: DIRECTORY_MIME.to_string(),
        size: 0,
    }
}

pub fn file_node(name: &str, path: &str, size: u64) -> Node {
    Node {
        mime: "text/plain".to_string(),
        size,
        ..dir_node(name, path)
    }
}
