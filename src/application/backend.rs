//! Port describing the blog admin REST backend.

use async_trait::async_trait;
use blogdesk_api_types::{BlogCreateRequest, BlogEntity, BlogId, BlogPage, BlogUpdateRequest};
use thiserror::Error;

use crate::domain::locale::LocaleTag;
use crate::domain::media::MediaAttachment;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("backend rejected the request with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    /// Message supplied by the backend itself, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            BackendError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub locale: LocaleTag,
    pub page: u32,
    pub size: u32,
}

#[async_trait]
pub trait BlogBackend: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<BlogPage, BackendError>;

    async fn get_by_id(&self, id: BlogId, locale: &LocaleTag) -> Result<BlogEntity, BackendError>;

    /// Returns `None` when the backend answers with a falsy identifier.
    async fn create(
        &self,
        request: &BlogCreateRequest,
        locale: &LocaleTag,
    ) -> Result<Option<BlogId>, BackendError>;

    async fn update(&self, request: &BlogUpdateRequest) -> Result<(), BackendError>;

    async fn upload_media(
        &self,
        id: BlogId,
        media: &MediaAttachment,
        locale: &LocaleTag,
    ) -> Result<(), BackendError>;

    async fn toggle_active(&self, id: BlogId, locale: &LocaleTag) -> Result<(), BackendError>;
}
