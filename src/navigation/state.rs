use std::collections::HashMap;

use crate::node::{Directory, Node};
use crate::path::VfsPath;

/// What the user picked in the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    GoToParent,
    SelectChild(Node),
}

/// What the presentation layer should do after a controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    SwitchToFileView,
    SwitchToBrowserView,
    Terminate,
}

/// Owned by the controller only. `parent_stack` is empty exactly when
/// `current_path == root_path`.
#[derive(Debug)]
pub(super) struct NavigationState {
    pub(super) root_path: VfsPath,
    pub(super) current_path: VfsPath,
    pub(super) parent_stack: Vec<VfsPath>,
    pub(super) directory_cache: HashMap<VfsPath, Directory>,
    pub(super) current_file_content: Option<Vec<u8>>,
}

impl NavigationState {
    pub(super) fn initial(root_path: VfsPath) -> Self {
        NavigationState {
            current_path: root_path.clone(),
            root_path,
            parent_stack: Vec::new(),
            directory_cache: HashMap::new(),
            current_file_content: None,
        }
    }

    pub(super) fn descend(&mut self, to: VfsPath) {
        let from = std::mem::replace(&mut self.current_path, to);
        self.parent_stack.push(from);
    }

    /// Returns `false` when there is nothing to pop.
    pub(super) fn ascend(&mut self) -> bool {
        match self.parent_stack.pop() {
            Some(parent) => {
                self.current_path = parent;
                true
            }
            None => false,
        }
    }
}
