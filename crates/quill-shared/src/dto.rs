//! Data Transfer Objects - request/response types for the API.
//!
//! Every optional input field is an explicit `Option`, so "is this key
//! present" is a compile-time-known question rather than a runtime probe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create a new blog.
///
/// Required fields are still `Option` here so the handler can answer with a
/// field-specific message instead of a generic deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author_id: Option<String>,
    pub category: Option<Vec<String>>,
    pub subcategory: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

impl CreateBlogRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.author_id.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.tags.is_none()
    }
}

/// Request to update a blog.
///
/// The immutable fields are modeled as raw JSON values: naming one of them is
/// forbidden whatever the value, so only presence matters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<Vec<String>>,
    pub subcategory: Option<Vec<String>>,
    pub is_published: Option<bool>,

    pub author_id: Option<serde_json::Value>,
    pub is_deleted: Option<serde_json::Value>,
    pub deleted_at: Option<serde_json::Value>,
    pub published_at: Option<serde_json::Value>,
}

impl UpdateBlogRequest {
    /// True when the patch carries no recognized field at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.tags.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.is_published.is_none()
            && !self.names_immutable_field()
    }

    /// True when the patch attempts to set a field the update path may never
    /// touch.
    pub fn names_immutable_field(&self) -> bool {
        self.author_id.is_some()
            || self.is_deleted.is_some()
            || self.deleted_at.is_some()
            || self.published_at.is_some()
    }
}

/// Query parameters for listing blogs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBlogsQuery {
    pub author_id: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub tags: Option<String>,
}

/// Query parameters for bulk soft-delete. Same dimensions as listing, plus a
/// direct `isPublished` term.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBlogsQuery {
    pub author_id: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub tags: Option<String>,
    pub is_published: Option<bool>,
}

impl DeleteBlogsQuery {
    pub fn is_empty(&self) -> bool {
        self.author_id.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.tags.is_none()
            && self.is_published.is_none()
    }
}

/// Request to create a new author.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// An author as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A blog as returned by the API, optionally enriched with its resolved
/// author.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorResponse>,
    pub category: Vec<String>,
    pub subcategory: Vec<String>,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub is_deleted: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
