//! Cached first page of the blog collection.
//!
//! The cache is never patched in place. Every mutation in the workflow is
//! followed by [`ListSynchronizer::refresh`], which fetches the page again
//! and swaps the whole collection.

use std::sync::Arc;

use blogdesk_api_types::BlogPage;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::backend::{BackendError, BlogBackend, ListQuery};

pub struct ListSynchronizer {
    backend: Arc<dyn BlogBackend>,
    query: ListQuery,
    current: RwLock<Option<BlogPage>>,
}

impl ListSynchronizer {
    pub fn new(backend: Arc<dyn BlogBackend>, query: ListQuery) -> Self {
        Self {
            backend,
            query,
            current: RwLock::new(None),
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Initial load when the list view is first shown.
    pub async fn mount(&self) -> Result<BlogPage, BackendError> {
        self.refresh().await
    }

    /// Fetch the page and replace the cached collection. On failure the
    /// previous collection stays in place.
    #[instrument(skip(self), fields(locale = %self.query.locale, page = self.query.page, size = self.query.size))]
    pub async fn refresh(&self) -> Result<BlogPage, BackendError> {
        let page = self.backend.list(&self.query).await?;
        debug!(count = page.items.len(), "blog list refreshed");
        *self.current.write().await = Some(page.clone());
        Ok(page)
    }

    pub async fn snapshot(&self) -> Option<BlogPage> {
        self.current.read().await.clone()
    }
}
