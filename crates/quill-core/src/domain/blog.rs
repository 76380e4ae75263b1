use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Blog entity - a single post in the catalogue.
///
/// Publication and deletion are independent one-way flags: each flips from
/// false to true at most once, stamping its timestamp when it does. Deletion
/// is terminal - a deleted blog can never be updated or deleted again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    pub category: Vec<String>,
    #[serde(default)]
    pub subcategory: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_published: bool,
    pub is_deleted: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Create a new blog in its initial state: not published, not deleted.
    pub fn new(
        title: String,
        body: String,
        author_id: Uuid,
        category: Vec<String>,
        subcategory: Vec<String>,
        tags: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            body,
            author_id,
            category,
            subcategory,
            tags,
            is_published: false,
            is_deleted: false,
            published_at: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_blog_starts_unpublished_and_not_deleted() {
        let blog = Blog::new(
            "A".to_owned(),
            "hello world".to_owned(),
            Uuid::new_v4(),
            vec!["tech".to_owned()],
            Vec::new(),
            Vec::new(),
        );

        assert!(!blog.is_published);
        assert!(!blog.is_deleted);
        assert!(blog.published_at.is_none());
        assert!(blog.deleted_at.is_none());
    }
}
