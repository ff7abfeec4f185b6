use crate::navigation::Selection;
use crate::utils::node_label;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(super) enum View {
    Browser,
    File,
}

pub(super) fn entry_label(entry: &Selection) -> String {
    match entry {
        Selection::GoToParent => "..".to_string(),
        Selection::SelectChild(node) => node_label(node),
    }
}
