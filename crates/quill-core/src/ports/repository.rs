use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Author, Blog};
use crate::error::RepoError;

/// Filter dimensions for blog queries.
///
/// Provided dimensions combine with logical OR: a blog matches the filter if
/// any one provided dimension matches it. Array dimensions (category, tags,
/// subcategory) match by containment. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogFilter {
    pub author_id: Option<Uuid>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub tags: Option<String>,
    /// Only honored by bulk delete; list queries never carry it.
    pub is_published: Option<bool>,
}

impl BlogFilter {
    pub fn is_empty(&self) -> bool {
        self.author_id.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.tags.is_none()
            && self.is_published.is_none()
    }

    /// In-memory evaluation of the OR-combined filter. This is the reference
    /// semantics that the storage adapters must reproduce in their own query
    /// language.
    pub fn matches(&self, blog: &Blog) -> bool {
        if self.is_empty() {
            return true;
        }

        self.author_id.is_some_and(|id| blog.author_id == id)
            || self
                .category
                .as_ref()
                .is_some_and(|c| blog.category.contains(c))
            || self.tags.as_ref().is_some_and(|t| blog.tags.contains(t))
            || self
                .subcategory
                .as_ref()
                .is_some_and(|s| blog.subcategory.contains(s))
            || self
                .is_published
                .is_some_and(|p| blog.is_published == p)
    }
}

/// A merge update against a single blog document.
///
/// Scalar fields replace the stored value; `push_*` fields append all of
/// their elements to the stored array. The whole patch applies as one atomic
/// update, so a crashed request never leaves a half-written blog behind.
#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub is_published: Option<bool>,
    pub push_tags: Option<Vec<String>>,
    pub push_category: Option<Vec<String>>,
    pub push_subcategory: Option<Vec<String>>,
    /// Stamped by the handler on the false -> true publish transition only.
    pub published_at: Option<DateTime<Utc>>,
}

impl BlogPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.is_published.is_none()
            && self.push_tags.is_none()
            && self.push_category.is_none()
            && self.push_subcategory.is_none()
            && self.published_at.is_none()
    }

    /// Reference application of the patch, used by the in-memory adapter.
    pub fn apply(&self, blog: &mut Blog) {
        if let Some(title) = &self.title {
            blog.title = title.clone();
        }
        if let Some(body) = &self.body {
            blog.body = body.clone();
        }
        if let Some(published) = self.is_published {
            blog.is_published = published;
        }
        if let Some(tags) = &self.push_tags {
            blog.tags.extend(tags.iter().cloned());
        }
        if let Some(category) = &self.push_category {
            blog.category.extend(category.iter().cloned());
        }
        if let Some(subcategory) = &self.push_subcategory {
            blog.subcategory.extend(subcategory.iter().cloned());
        }
        if let Some(at) = self.published_at {
            blog.published_at = Some(at);
        }
    }
}

/// Author repository.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find an author by their unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError>;

    /// Persist a new author.
    async fn insert(&self, author: Author) -> Result<Author, RepoError>;
}

/// Blog repository - the only collaborator that touches the document store.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Find a blog by its unique ID, deleted or not.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError>;

    /// Persist a new blog.
    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError>;

    /// All blogs with `is_deleted = false` and `is_published = true` that
    /// match the filter.
    async fn find_visible(&self, filter: &BlogFilter) -> Result<Vec<Blog>, RepoError>;

    /// Apply the patch as one merge update and return the updated blog, or
    /// `None` if the blog does not exist.
    async fn update(&self, id: Uuid, patch: BlogPatch) -> Result<Option<Blog>, RepoError>;

    /// Mark one non-deleted blog as deleted, stamping `deleted_at` and
    /// clearing `is_published`. Returns false if nothing was modified.
    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, RepoError>;

    /// Mark every non-deleted blog matching the filter as deleted; returns
    /// the number of modified documents.
    async fn soft_delete_many(
        &self,
        filter: &BlogFilter,
        at: DateTime<Utc>,
    ) -> Result<u64, RepoError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog() -> Blog {
        Blog::new(
            "A".to_owned(),
            "hello world".to_owned(),
            Uuid::new_v4(),
            vec!["tech".to_owned()],
            vec!["backend".to_owned()],
            vec!["rust".to_owned()],
        )
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(BlogFilter::default().matches(&blog()));
    }

    #[test]
    fn provided_dimensions_combine_with_or() {
        let blog = blog();

        // One matching dimension is enough, even when another one misses.
        let filter = BlogFilter {
            author_id: Some(Uuid::new_v4()),
            category: Some("tech".to_owned()),
            ..Default::default()
        };
        assert!(filter.matches(&blog));

        // No provided dimension matches.
        let filter = BlogFilter {
            category: Some("cooking".to_owned()),
            tags: Some("go".to_owned()),
            ..Default::default()
        };
        assert!(!filter.matches(&blog));
    }

    #[test]
    fn array_dimensions_match_by_containment() {
        let blog = blog();

        let filter = BlogFilter {
            tags: Some("rust".to_owned()),
            ..Default::default()
        };
        assert!(filter.matches(&blog));

        let filter = BlogFilter {
            subcategory: Some("backend".to_owned()),
            ..Default::default()
        };
        assert!(filter.matches(&blog));
    }

    #[test]
    fn patch_replaces_scalars_and_appends_arrays() {
        let mut blog = blog();
        let patch = BlogPatch {
            title: Some("B".to_owned()),
            push_tags: Some(vec!["web".to_owned(), "async".to_owned()]),
            ..Default::default()
        };

        patch.apply(&mut blog);

        assert_eq!(blog.title, "B");
        assert_eq!(blog.tags, ["rust", "web", "async"]);
        assert_eq!(blog.body, "hello world");
    }
}
