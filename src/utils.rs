use crate::node::Node;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Byte count for listings: `512b`, `2.00kb`, `1.50mb`, `3.25gb`.
pub fn human_size(size: u64) -> String {
    if size < KB {
        format!("{size}b")
    } else if size < MB {
        format!("{:.2}kb", size as f64 / KB as f64)
    } else if size < GB {
        format!("{:.2}mb", size as f64 / MB as f64)
    } else {
        format!("{:.2}gb", size as f64 / GB as f64)
    }
}

/// One listing line: `name/` for directories, `name <size>` for files.
pub fn node_label(node: &Node) -> String {
    if node.is_dir() {
        format!("{}/", node.name)
    } else {
        format!("{} {}", node.name, human_size(node.size))
    }
}
