use std::collections::hash_map::Entry;
use tracing::debug;

use super::state::{NavigationState, Selection, Transition};
use crate::client::TreeStoreClient;
use crate::error::{Error, Result};
use crate::node::Directory;
use crate::path::VfsPath;

/// State machine between the presentation layer and the tree store.
///
/// Listings are memoized per path until the path is refreshed; the content of
/// the open file is memoized in a single slot until it is reloaded or the file
/// view is left. The store is only called on a cache miss.
pub struct NavigationController<C> {
    client: C,
    state: NavigationState,
}

impl<C: TreeStoreClient> NavigationController<C> {
    pub fn new(client: C) -> Self {
        NavigationController::with_root(client, VfsPath::root())
    }

    pub fn with_root(client: C, root_path: VfsPath) -> Self {
        NavigationController {
            client,
            state: NavigationState::initial(root_path),
        }
    }

    pub fn current_path(&self) -> &VfsPath {
        &self.state.current_path
    }

    pub fn root_path(&self) -> &VfsPath {
        &self.state.root_path
    }

    /// Number of ancestors on the breadcrumb stack.
    pub fn depth(&self) -> usize {
        self.state.parent_stack.len()
    }

    pub fn is_at_root(&self) -> bool {
        let at_root = self.state.parent_stack.is_empty();
        debug_assert_eq!(
            at_root,
            self.state.current_path == self.state.root_path,
            "breadcrumb stack out of sync with {}",
            self.state.current_path
        );
        at_root
    }

    pub fn current_directory(&mut self) -> Result<&Directory> {
        match self
            .state
            .directory_cache
            .entry(self.state.current_path.clone())
        {
            Entry::Occupied(cached) => {
                debug!(path = %cached.key(), "listing served from cache");
                Ok(&*cached.into_mut())
            }
            Entry::Vacant(slot) => {
                debug!(path = %slot.key(), "listing cache miss");
                let directory = self.client.list_directory(slot.key())?;
                Ok(&*slot.insert(directory))
            }
        }
    }

    /// Forgets the listing of the current path. The next [`current_directory`]
    /// call fetches it again.
    ///
    /// [`current_directory`]: NavigationController::current_directory
    pub fn refresh_current_directory(&mut self) {
        if self
            .state
            .directory_cache
            .remove(&self.state.current_path)
            .is_some()
        {
            debug!(path = %self.state.current_path, "listing invalidated");
        }
    }

    pub fn enter(&mut self, selection: &Selection) -> Result<Transition> {
        match selection {
            Selection::GoToParent => {
                if !self.state.ascend() {
                    return Err(Error::AtRoot);
                }
                debug!(path = %self.state.current_path, depth = self.depth(), "went up");
                Ok(Transition::Stay)
            }
            Selection::SelectChild(node) if node.is_dir() => {
                self.state.descend(node.path.clone());
                debug!(path = %self.state.current_path, depth = self.depth(), "entered directory");
                Ok(Transition::Stay)
            }
            Selection::SelectChild(node) => {
                self.state.descend(node.path.clone());
                self.state.current_file_content = None;
                debug!(path = %self.state.current_path, "opened file");
                Ok(Transition::SwitchToFileView)
            }
        }
    }

    pub fn go_back_to_browser(&mut self) -> Result<Transition> {
        self.state.current_file_content = None;
        if !self.state.ascend() {
            return Err(Error::EmptyStack);
        }
        debug!(path = %self.state.current_path, "back to browser");
        Ok(Transition::SwitchToBrowserView)
    }

    pub fn current_file(&mut self) -> Result<&[u8]> {
        let content = match self.state.current_file_content.take() {
            Some(content) => {
                debug!(path = %self.state.current_path, "file served from cache");
                content
            }
            None => self.client.read_file(&self.state.current_path)?,
        };
        Ok(self.state.current_file_content.insert(content).as_slice())
    }

    /// Always fetches, then serves the fresh content from the cache.
    pub fn reload_current_file(&mut self) -> Result<&[u8]> {
        self.state.current_file_content = None;
        self.current_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeStore, dir_node, file_node};

    fn path(raw: &str) -> VfsPath {
        VfsPath::parse(raw).unwrap()
    }

    fn sample_store() -> FakeStore {
        FakeStore::new()
            .with_directory(
                "/home/",
                vec![
                    dir_node("logs", "/home/logs/"),
                    file_node("app.log", "/home/app.log", 2048),
                ],
            )
            .with_directory(
                "/home/logs/",
                vec![
                    dir_node("2024", "/home/logs/2024/"),
                    file_node("err.log", "/home/logs/err.log", 10),
                ],
            )
            .with_directory("/home/logs/2024/", vec![])
            .with_file("/home/app.log", b"hello\nworld\n")
            .with_file("/home/logs/err.log", b"boom")
    }

    fn child(store: &FakeStore, dir: &str, name: &str) -> Selection {
        Selection::SelectChild(store.node(dir, name))
    }

    #[test]
    fn listing_is_fetched_once_between_refreshes() {
        let store = sample_store();
        let mut nav = NavigationController::new(&store);

        let first = nav.current_directory().unwrap().clone();
        let second = nav.current_directory().unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(store.list_calls(), 1);

        nav.refresh_current_directory();
        let third = nav.current_directory().unwrap().clone();
        assert_eq!(third, first);
        assert_eq!(store.list_calls(), 2);
        nav.current_directory().unwrap();
        assert_eq!(store.list_calls(), 2);
    }

    #[test]
    fn refresh_is_lazy_and_idempotent() {
        let store = sample_store();
        let mut nav = NavigationController::new(&store);
        nav.refresh_current_directory();
        nav.refresh_current_directory();
        assert_eq!(store.list_calls(), 0);

        nav.current_directory().unwrap();
        nav.refresh_current_directory();
        nav.refresh_current_directory();
        assert_eq!(store.list_calls(), 1);
    }

    #[test]
    fn listings_are_cached_per_path() {
        let store = sample_store();
        let mut nav = NavigationController::new(&store);
        nav.current_directory().unwrap();
        nav.enter(&child(&store, "/home/", "logs")).unwrap();
        nav.current_directory().unwrap();
        nav.enter(&Selection::GoToParent).unwrap();
        let root = nav.current_directory().unwrap();
        assert_eq!(root.path, VfsPath::root());
        assert_eq!(store.list_calls(), 2);
    }

    #[test]
    fn refresh_only_drops_the_current_path() {
        let store = sample_store();
        let mut nav = NavigationController::new(&store);
        nav.current_directory().unwrap();
        nav.enter(&child(&store, "/home/", "logs")).unwrap();
        nav.current_directory().unwrap();
        nav.refresh_current_directory();
        nav.enter(&Selection::GoToParent).unwrap();
        nav.current_directory().unwrap();
        assert_eq!(store.list_calls(), 2);
    }

    #[test]
    fn entering_a_directory_pushes_the_breadcrumb() {
        let store = sample_store();
        let mut nav = NavigationController::new(&store);
        let transition = nav.enter(&child(&store, "/home/", "logs")).unwrap();
        assert_eq!(transition, Transition::Stay);
        assert_eq!(nav.current_path(), &path("/home/logs/"));
        assert_eq!(nav.depth(), 1);
        assert!(!nav.is_at_root());
        assert_eq!(store.list_calls(), 0);
    }

    #[test]
    fn going_up_n_times_restores_the_root() {
        let store = sample_store();
        let mut nav = NavigationController::new(&store);
        nav.enter(&child(&store, "/home/", "logs")).unwrap();
        nav.enter(&child(&store, "/home/logs/", "2024")).unwrap();
        assert_eq!(nav.depth(), 2);

        assert_eq!(nav.enter(&Selection::GoToParent).unwrap(), Transition::Stay);
        assert_eq!(nav.current_path(), &path("/home/logs/"));
        nav.enter(&Selection::GoToParent).unwrap();
        assert_eq!(nav.current_path(), nav.root_path());
        assert_eq!(nav.depth(), 0);
        assert!(nav.is_at_root());
    }

    #[test]
    fn going_up_from_root_fails() {
        let store = sample_store();
        let mut nav = NavigationController::new(&store);
        assert!(matches!(nav.enter(&Selection::GoToParent), Err(Error::AtRoot)));
        assert!(nav.is_at_root());
    }

    #[test]
    fn opening_a_file_switches_view_and_back_restores_the_directory() {
        let store = sample_store();
        let mut nav = NavigationController::new(&store);
        nav.enter(&child(&store, "/home/", "logs")).unwrap();

        let transition = nav.enter(&child(&store, "/home/logs/", "err.log")).unwrap();
        assert_eq!(transition, Transition::SwitchToFileView);
        assert_eq!(nav.current_path(), &path("/home/logs/err.log"));
        assert_eq!(nav.current_file().unwrap(), b"boom");

        assert_eq!(
            nav.go_back_to_browser().unwrap(),
            Transition::SwitchToBrowserView
        );
        assert_eq!(nav.current_path(), &path("/home/logs/"));
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn root_listing_scenario() {
        let store = sample_store();
        let mut nav = NavigationController::new(&store);
        let nodes = nav.current_directory().unwrap().nodes.clone();
        let logs = nodes.iter().find(|n| n.name == "logs").unwrap().clone();
        let app_log = nodes.iter().find(|n| n.name == "app.log").unwrap().clone();

        nav.enter(&Selection::SelectChild(logs)).unwrap();
        assert_eq!(nav.current_path(), &path("/home/logs/"));
        assert_eq!(nav.state.parent_stack, [VfsPath::root()]);

        nav.enter(&Selection::GoToParent).unwrap();
        let transition = nav.enter(&Selection::SelectChild(app_log)).unwrap();
        assert_eq!(transition, Transition::SwitchToFileView);
        assert_eq!(nav.current_path(), &path("/home/app.log"));
        assert_eq!(nav.state.parent_stack, [VfsPath::root()]);
    }

    #[test]
    fn file_content_is_memoized_until_reload() {
        let store = sample_store();
        let mut nav = NavigationController::new(&store);
        nav.enter(&child(&store, "/home/", "app.log")).unwrap();

        assert_eq!(nav.current_file().unwrap(), b"hello\nworld\n");
        nav.current_file().unwrap();
        assert_eq!(store.read_calls(), 1);

        store.replace_file("/home/app.log", b"hello\nworld\nagain\n");
        assert_eq!(nav.current_file().unwrap(), b"hello\nworld\n");
        assert_eq!(nav.reload_current_file().unwrap(), b"hello\nworld\nagain\n");
        assert_eq!(store.read_calls(), 2);
        nav.current_file().unwrap();
        assert_eq!(store.read_calls(), 2);
    }

    #[test]
    fn reload_always_fetches() {
        let store = sample_store();
        let mut nav = NavigationController::new(&store);
        nav.enter(&child(&store, "/home/", "app.log")).unwrap();
        nav.reload_current_file().unwrap();
        nav.reload_current_file().unwrap();
        assert_eq!(store.read_calls(), 2);
    }

    #[test]
    fn leaving_the_file_view_drops_the_content() {
        let store = sample_store();
        let mut nav = NavigationController::new(&store);
        nav.enter(&child(&store, "/home/", "app.log")).unwrap();
        nav.current_file().unwrap();
        nav.go_back_to_browser().unwrap();
        assert!(nav.state.current_file_content.is_none());

        nav.enter(&child(&store, "/home/", "app.log")).unwrap();
        nav.current_file().unwrap();
        assert_eq!(store.read_calls(), 2);
    }

    #[test]
    fn back_to_browser_with_empty_stack_fails() {
        let store = sample_store();
        let mut nav = NavigationController::new(&store);
        assert!(matches!(nav.go_back_to_browser(), Err(Error::EmptyStack)));
        assert_eq!(nav.current_path(), &VfsPath::root());
    }

    #[test]
    fn store_errors_pass_through_and_are_not_cached() {
        let store = sample_store();
        let mut nav = NavigationController::new(&store);
        nav.enter(&child(&store, "/home/", "app.log")).unwrap();

        // A file path listed as a directory.
        assert!(matches!(
            nav.current_directory(),
            Err(Error::NotADirectory(ref p)) if p == "/home/app.log"
        ));
        assert!(nav.current_directory().is_err());
        assert_eq!(store.list_calls(), 2);

        store.fail_with_status(503);
        assert!(matches!(
            nav.reload_current_file(),
            Err(Error::HttpStatus { status: 503, .. })
        ));
        assert!(nav.state.current_file_content.is_none());
    }
}
