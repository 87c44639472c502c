//! Request and response shapes exchanged with the blog admin backend.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Backend-assigned blog identifier.
pub type BlogId = i64;

/// One locale's content as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationPayload {
    pub language: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogCreateRequest {
    pub slogan: String,
    pub product_ids: Vec<i64>,
    pub translations: Vec<TranslationPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogUpdateRequest {
    pub id: BlogId,
    pub slogan: String,
    pub product_ids: Vec<i64>,
    pub translations: Vec<TranslationPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Server-owned blog record as returned by the list and detail endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogEntity {
    pub id: BlogId,
    #[serde(default)]
    pub slogan: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub translations: Vec<TranslationPayload>,
    #[serde(default)]
    pub products: Vec<ProductSummary>,
}

/// One page of the blog collection.
///
/// Accepts both the `content`/`number` naming used by paged REST backends and
/// the plain `items`/`page` naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPage {
    #[serde(default, rename = "content", alias = "items")]
    pub items: Vec<BlogEntity>,
    #[serde(default, rename = "number", alias = "page")]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
}

impl BlogPage {
    pub fn find(&self, id: BlogId) -> Option<&BlogEntity> {
        self.items.iter().find(|entity| entity.id == id)
    }
}

/// Error envelope some backend rejections carry.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Interpret the bare scalar returned by the create endpoint.
///
/// Falsy values (`null`, `false`, `0`, an empty string) and anything that is
/// not an integer yield `None`.
pub fn parse_created_id(value: &serde_json::Value) -> Option<BlogId> {
    let id = match value {
        serde_json::Value::Number(number) => number.as_i64(),
        serde_json::Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    (id != 0).then_some(id)
}
