use super::error::{CatalogError, Result};
use super::types::FileEntry;
use crate::config::Config;
use std::path::PathBuf;
use tokio::fs;

/// Enumerates the files directory into [`FileEntry`] records.
#[derive(Debug, Clone)]
pub struct CatalogLister {
    dir: PathBuf,
    route_prefix: String,
}

impl CatalogLister {
    pub fn new(config: &Config) -> Self {
        Self {
            dir: config.files_dir.clone(),
            route_prefix: config.route_prefix.clone(),
        }
    }

    /// Reads the directory afresh. Order follows the file system's
    /// enumeration order. Any failure, including a failed stat of a single
    /// entry, fails the whole listing.
    #[tracing::instrument(skip(self), fields(dir = %self.dir.display()))]
    pub async fn list_files(&self) -> Result<Vec<FileEntry>> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(CatalogError::DirectoryRead)?;
        let mut files = Vec::new();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(CatalogError::DirectoryRead)?
        {
            let name = entry.file_name().to_string_lossy().to_string();
            // Stat the joined path so symlinks report their target's size.
            let metadata = fs::metadata(entry.path())
                .await
                .map_err(CatalogError::DirectoryRead)?;

            files.push(FileEntry::new(name, metadata.len(), &self.route_prefix));
        }

        tracing::debug!(count = files.len(), "Listed files");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn lister_for(dir: &std::path::Path) -> CatalogLister {
        let config = Config {
            files_dir: dir.to_path_buf(),
            ..Config::default()
        };
        CatalogLister::new(&config)
    }

    #[tokio::test]
    async fn test_list_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let files = lister_for(dir.path()).list_files().await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_list_files_builds_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), vec![b'a'; 10]).unwrap();
        std::fs::write(dir.path().join("b.bin"), vec![0u8; 2048]).unwrap();

        let mut files = lister_for(dir.path()).list_files().await.unwrap();
        files.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            files,
            vec![
                FileEntry {
                    name: "a.txt".to_string(),
                    size: "10 Bytes".to_string(),
                    path: "/files/a.txt".to_string(),
                },
                FileEntry {
                    name: "b.bin".to_string(),
                    size: "2 KB".to_string(),
                    path: "/files/b.bin".to_string(),
                },
            ]
        );
        let names: HashSet<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names.len(), files.len());
    }

    #[tokio::test]
    async fn test_list_includes_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let files = lister_for(dir.path()).list_files().await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "nested");
        assert_eq!(files[0].path, "/files/nested");
    }

    #[tokio::test]
    async fn test_list_uses_configured_prefix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("x"), b"x").unwrap();
        let config = Config {
            files_dir: dir.path().to_path_buf(),
            route_prefix: "/static/dl/".to_string(),
            ..Config::default()
        };

        let files = CatalogLister::new(&config).list_files().await.unwrap();
        assert_eq!(files[0].path, "/static/dl/x");
    }

    #[tokio::test]
    async fn test_list_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        for (name, len) in [("one", 1usize), ("two", 2000), ("three", 3_000_000)] {
            std::fs::write(dir.path().join(name), vec![0u8; len]).unwrap();
        }
        let lister = lister_for(dir.path());

        let mut first = lister.list_files().await.unwrap();
        let mut second = lister.list_files().await.unwrap();
        first.sort_by(|a, b| a.name.cmp(&b.name));
        second.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_list_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = lister_for(&dir.path().join("missing")).list_files().await;
        assert!(matches!(result, Err(CatalogError::DirectoryRead(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_broken_symlink_fails_whole_listing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ok.txt"), b"ok").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

        let result = lister_for(dir.path()).list_files().await;
        assert!(matches!(result, Err(CatalogError::DirectoryRead(_))));
    }
}
