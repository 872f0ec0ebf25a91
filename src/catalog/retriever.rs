use super::error::{CatalogError, Result};
use crate::config::Config;
use crate::utils::common::mime_guess;
use crate::utils::path::{confine, lexical_join, resolves_within};
use std::path::PathBuf;
use tokio::fs;

/// An opened file ready to be streamed to a client.
#[derive(Debug)]
pub struct Download {
    /// Base name suggested to the client for saving.
    pub file_name: String,
    pub size: u64,
    pub mime_type: &'static str,
    pub file: fs::File,
}

/// Resolves client-supplied names against the files directory.
#[derive(Debug, Clone)]
pub struct FileRetriever {
    dir: PathBuf,
    allow_unsafe_names: bool,
}

impl FileRetriever {
    pub fn new(config: &Config) -> Self {
        Self {
            dir: config.files_dir.clone(),
            allow_unsafe_names: config.allow_unsafe_names,
        }
    }

    /// Maps a requested name to a path on disk.
    ///
    /// Unless unsafe names are allowed, the name must be a plain relative path
    /// that stays inside the files directory.
    pub fn resolve(&self, file_name: &str) -> Result<PathBuf> {
        if self.allow_unsafe_names {
            return Ok(lexical_join(&self.dir, file_name));
        }

        confine(&self.dir, file_name)
            .filter(|path| path != &self.dir)
            .ok_or_else(|| CatalogError::UnsafeName(file_name.to_string()))
    }

    #[tracing::instrument(skip(self))]
    pub async fn retrieve(&self, file_name: &str) -> Result<Download> {
        // A trailing separator names a directory, never a downloadable file.
        if file_name.ends_with(std::path::is_separator) {
            return Err(CatalogError::NotFound(file_name.to_string()));
        }
        let path = self.resolve(file_name)?;

        // Anything that cannot be stat'ed, or is not a regular file, is absent.
        let is_file = fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(CatalogError::NotFound(file_name.to_string()));
        }
        if !self.allow_unsafe_names && !resolves_within(&self.dir, &path).await {
            return Err(CatalogError::UnsafeName(file_name.to_string()));
        }

        let file = fs::File::open(&path).await?;
        let size = file.metadata().await?.len();
        let base_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Ok(Download {
            mime_type: mime_guess(&path),
            file_name: base_name,
            size,
            file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tokio::io::AsyncReadExt;

    fn retriever_for(dir: &std::path::Path, allow_unsafe_names: bool) -> FileRetriever {
        let config = Config {
            files_dir: dir.to_path_buf(),
            allow_unsafe_names,
            ..Config::default()
        };
        FileRetriever::new(&config)
    }

    #[tokio::test]
    async fn test_retrieve_returns_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let content: Vec<u8> = (0..=255u8).cycle().take(5000).collect();
        std::fs::write(dir.path().join("data.bin"), &content).unwrap();

        let mut download = retriever_for(dir.path(), false)
            .retrieve("data.bin")
            .await
            .unwrap();

        assert_eq!(download.file_name, "data.bin");
        assert_eq!(download.size, 5000);
        assert_eq!(download.mime_type, "application/octet-stream");

        let mut read = Vec::new();
        download.file.read_to_end(&mut read).await.unwrap();
        assert_eq!(read, content);
    }

    #[tokio::test]
    async fn test_retrieve_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = retriever_for(dir.path(), false).retrieve("nope.txt").await;
        assert!(matches!(result, Err(CatalogError::NotFound(name)) if name == "nope.txt"));
    }

    #[tokio::test]
    async fn test_retrieve_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let result = retriever_for(dir.path(), false).retrieve("sub").await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_retrieve_nested_relative_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/inner.txt"), b"inner").unwrap();

        let download = retriever_for(dir.path(), false)
            .retrieve("sub/inner.txt")
            .await
            .unwrap();
        assert_eq!(download.file_name, "inner.txt");
        assert_eq!(download.mime_type, "text/plain");
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("..")]
    #[case("../secret.txt")]
    #[case("sub/../../secret.txt")]
    #[case("/etc/passwd")]
    fn test_resolve_rejects_unsafe_names(#[case] name: &str) {
        let retriever = retriever_for(std::path::Path::new("/srv/files"), false);
        assert!(matches!(
            retriever.resolve(name),
            Err(CatalogError::UnsafeName(_))
        ));
    }

    #[test]
    fn test_resolve_unsafe_mode_allows_traversal() {
        let retriever = retriever_for(std::path::Path::new("/srv/public/files"), true);
        assert_eq!(
            retriever.resolve("../secret.txt").unwrap(),
            PathBuf::from("/srv/public/secret.txt")
        );
        assert_eq!(
            retriever.resolve("/etc/passwd").unwrap(),
            PathBuf::from("/srv/public/files/etc/passwd")
        );
    }

    #[tokio::test]
    async fn test_retrieve_traversal_depends_on_flag() {
        let root = tempfile::tempdir().unwrap();
        let files = root.path().join("files");
        std::fs::create_dir(&files).unwrap();
        std::fs::write(root.path().join("secret.txt"), b"secret").unwrap();

        let safe = retriever_for(&files, false).retrieve("../secret.txt").await;
        assert!(matches!(safe, Err(CatalogError::UnsafeName(_))));

        let mut unsafe_download = retriever_for(&files, true)
            .retrieve("../secret.txt")
            .await
            .unwrap();
        let mut read = String::new();
        unsafe_download.file.read_to_string(&mut read).await.unwrap();
        assert_eq!(read, "secret");
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    #[tokio::test]
    async fn test_retrieve_trailing_separator_is_not_found(#[case] allow_unsafe_names: bool) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();

        let result = retriever_for(dir.path(), allow_unsafe_names)
            .retrieve("a.txt/")
            .await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_retrieve_symlink_outside_dir_depends_on_flag() {
        let root = tempfile::tempdir().unwrap();
        let files = root.path().join("files");
        let outside = root.path().join("outside");
        std::fs::create_dir(&files).unwrap();
        std::fs::create_dir(&outside).unwrap();
        std::fs::write(outside.join("secret.txt"), b"secret").unwrap();
        std::os::unix::fs::symlink(&outside, files.join("linked")).unwrap();

        let safe = retriever_for(&files, false)
            .retrieve("linked/secret.txt")
            .await;
        assert!(matches!(safe, Err(CatalogError::UnsafeName(_))));

        let download = retriever_for(&files, true)
            .retrieve("linked/secret.txt")
            .await
            .unwrap();
        assert_eq!(download.size, 6);
    }
}
