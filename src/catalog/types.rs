use serde::Serialize;

/// One directory entry as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub name: String,
    /// Human-readable size, see [`format_size`](super::format_size).
    pub size: String,
    /// Route prefix followed by `name`.
    pub path: String,
}

impl FileEntry {
    pub fn new(name: String, bytes: u64, route_prefix: &str) -> Self {
        let path = format!("{}{}", route_prefix, name);
        Self {
            size: super::format_size(bytes),
            path,
            name,
        }
    }
}
