use crate::catalog::{CatalogLister, FileRetriever};
use crate::config::Config;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub lister: CatalogLister,
    pub retriever: FileRetriever,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            lister: CatalogLister::new(&config),
            retriever: FileRetriever::new(&config),
            config: Arc::new(config),
        }
    }
}
