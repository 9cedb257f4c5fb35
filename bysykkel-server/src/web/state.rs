//! Application state for the web layer.

use std::sync::Arc;

use crate::gbfs::FeedSource;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Where station feeds are fetched from on every request
    pub feeds: Arc<FeedSource>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(feeds: FeedSource) -> Self {
        Self {
            feeds: Arc::new(feeds),
        }
    }
}
