use std::path::{Component, Path, PathBuf};

/// Lexically resolves `.` and `..` without touching the file system.
///
/// A `..` that cannot pop a normal component is kept on relative paths and
/// dropped at the root.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut ret = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(..) => ret.push(component.as_os_str()),
            Component::RootDir => ret.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match ret.components().next_back() {
                Some(Component::Normal(_)) => {
                    ret.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => ret.push(".."),
            },
            Component::Normal(c) => ret.push(c),
        }
    }
    ret
}

/// Joins `name` under `base` treating every component as relative, then
/// normalizes. Parent references are honoured, so the result may leave `base`.
pub fn lexical_join(base: &Path, name: &str) -> PathBuf {
    let mut joined = base.to_path_buf();
    for component in Path::new(name).components() {
        match component {
            Component::Prefix(..) | Component::RootDir => {}
            other => joined.push(other.as_os_str()),
        }
    }
    normalize_path(&joined)
}

/// Joins `relative` under `base` only if it cannot escape it.
///
/// Returns `None` for absolute paths and any `..` component. An empty or
/// `.`-only input yields `base` itself.
pub fn confine(base: &Path, relative: &str) -> Option<PathBuf> {
    let mut joined = base.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(c) => joined.push(c),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(..) => return None,
        }
    }
    Some(joined)
}

/// Whether `target` still lies under `base` once symlinks are resolved.
/// Anything that cannot be canonicalized counts as outside.
pub async fn resolves_within(base: &Path, target: &Path) -> bool {
    match (
        tokio::fs::canonicalize(base).await,
        tokio::fs::canonicalize(target).await,
    ) {
        (Ok(base), Ok(target)) => target.starts_with(base),
        _ => false,
    }
}
