use std::io;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read directory: {0}")]
    DirectoryRead(#[source] io::Error),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Unsafe file name: {0:?}")]
    UnsafeName(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
