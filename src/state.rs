//! Shared application state for all routes.

use crate::config::ResourceConfig;
use crate::store::CommentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CommentStore>,
    pub resource: Arc<ResourceConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn CommentStore>, resource: ResourceConfig) -> Self {
        AppState {
            store,
            resource: Arc::new(resource),
        }
    }
}
