//! File catalog: listing and retrieval over a single base directory.
//!
//! Both components are built from the same [`Config`](crate::config::Config)
//! and are independent of each other and of the HTTP layer.

pub mod error;
pub mod lister;
pub mod retriever;
pub mod size;
pub mod types;

pub use error::CatalogError;
pub use lister::CatalogLister;
pub use retriever::FileRetriever;
pub use size::format_size;
pub use types::FileEntry;
