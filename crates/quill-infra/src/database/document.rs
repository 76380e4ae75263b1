//! Document models for the Mongo collections.
//!
//! Kept separate from the domain entities, mirroring the split between
//! storage schema and business objects: ids are stored as hex strings and
//! timestamps as epoch milliseconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::domain::{Author, Blog};
use quill_core::error::RepoError;

/// A blog as stored in the `blogs` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub body: String,
    pub author_id: String,
    pub category: Vec<String>,
    pub subcategory: Vec<String>,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub is_deleted: bool,
    pub published_at: Option<i64>,
    pub deleted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// An author as stored in the `authors` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: i64,
}

fn parse_id(raw: &str) -> Result<Uuid, RepoError> {
    Uuid::parse_str(raw).map_err(|e| RepoError::Query(format!("malformed stored id {raw}: {e}")))
}

fn from_millis(millis: i64) -> Result<DateTime<Utc>, RepoError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| RepoError::Query(format!("stored timestamp out of range: {millis}")))
}

impl From<Blog> for BlogDocument {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id.to_string(),
            title: blog.title,
            body: blog.body,
            author_id: blog.author_id.to_string(),
            category: blog.category,
            subcategory: blog.subcategory,
            tags: blog.tags,
            is_published: blog.is_published,
            is_deleted: blog.is_deleted,
            published_at: blog.published_at.map(|at| at.timestamp_millis()),
            deleted_at: blog.deleted_at.map(|at| at.timestamp_millis()),
            created_at: blog.created_at.timestamp_millis(),
            updated_at: blog.updated_at.timestamp_millis(),
        }
    }
}

impl TryFrom<BlogDocument> for Blog {
    type Error = RepoError;

    fn try_from(doc: BlogDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(&doc.id)?,
            title: doc.title,
            body: doc.body,
            author_id: parse_id(&doc.author_id)?,
            category: doc.category,
            subcategory: doc.subcategory,
            tags: doc.tags,
            is_published: doc.is_published,
            is_deleted: doc.is_deleted,
            published_at: doc.published_at.map(from_millis).transpose()?,
            deleted_at: doc.deleted_at.map(from_millis).transpose()?,
            created_at: from_millis(doc.created_at)?,
            updated_at: from_millis(doc.updated_at)?,
        })
    }
}

impl From<Author> for AuthorDocument {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.to_string(),
            name: author.name,
            email: author.email,
            created_at: author.created_at.timestamp_millis(),
        }
    }
}

impl TryFrom<AuthorDocument> for Author {
    type Error = RepoError;

    fn try_from(doc: AuthorDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(&doc.id)?,
            name: doc.name,
            email: doc.email,
            created_at: from_millis(doc.created_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blog_round_trips_through_document_form() {
        let blog = Blog::new(
            "A".to_owned(),
            "hello world".to_owned(),
            Uuid::new_v4(),
            vec!["tech".to_owned()],
            Vec::new(),
            vec!["rust".to_owned()],
        );

        let restored = Blog::try_from(BlogDocument::from(blog.clone())).unwrap();

        assert_eq!(restored.id, blog.id);
        assert_eq!(restored.author_id, blog.author_id);
        assert_eq!(restored.tags, blog.tags);
        assert_eq!(
            restored.created_at.timestamp_millis(),
            blog.created_at.timestamp_millis()
        );
        assert!(restored.published_at.is_none());
    }

    #[test]
    fn malformed_stored_id_is_a_query_error() {
        let mut doc = BlogDocument::from(Blog::new(
            "A".to_owned(),
            "b".to_owned(),
            Uuid::new_v4(),
            vec!["tech".to_owned()],
            Vec::new(),
            Vec::new(),
        ));
        doc.id = "not-a-uuid".to_owned();

        assert!(matches!(
            Blog::try_from(doc),
            Err(RepoError::Query(_))
        ));
    }
}
