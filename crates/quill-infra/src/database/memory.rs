//! In-memory repository implementations.
//!
//! Used as the fallback when no database is configured, and as the test
//! double for handler tests. Note: data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Author, Blog};
use quill_core::error::RepoError;
use quill_core::ports::{AuthorRepository, BlogFilter, BlogPatch, BlogRepository};

/// In-memory author repository backed by a HashMap with an async RwLock.
#[derive(Default)]
pub struct InMemoryAuthorRepository {
    store: RwLock<HashMap<Uuid, Author>>,
}

impl InMemoryAuthorRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorRepository for InMemoryAuthorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn insert(&self, author: Author) -> Result<Author, RepoError> {
        let mut store = self.store.write().await;
        store.insert(author.id, author.clone());
        Ok(author)
    }
}

/// In-memory blog repository backed by a HashMap with an async RwLock.
#[derive(Default)]
pub struct InMemoryBlogRepository {
    store: RwLock<HashMap<Uuid, Blog>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn stamp_deleted(blog: &mut Blog, at: DateTime<Utc>) {
    blog.is_deleted = true;
    blog.is_published = false;
    blog.deleted_at = Some(at);
    blog.updated_at = at;
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut store = self.store.write().await;
        store.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn find_visible(&self, filter: &BlogFilter) -> Result<Vec<Blog>, RepoError> {
        let store = self.store.read().await;

        let mut visible: Vec<Blog> = store
            .values()
            .filter(|blog| !blog.is_deleted && blog.is_published && filter.matches(blog))
            .cloned()
            .collect();

        // HashMap iteration order is arbitrary; keep responses stable.
        visible.sort_by_key(|blog| blog.created_at);
        Ok(visible)
    }

    async fn update(&self, id: Uuid, patch: BlogPatch) -> Result<Option<Blog>, RepoError> {
        let mut store = self.store.write().await;

        let Some(blog) = store.get_mut(&id) else {
            return Ok(None);
        };

        patch.apply(blog);
        blog.updated_at = Utc::now();
        Ok(Some(blog.clone()))
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, RepoError> {
        let mut store = self.store.write().await;

        match store.get_mut(&id) {
            Some(blog) if !blog.is_deleted => {
                stamp_deleted(blog, at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn soft_delete_many(
        &self,
        filter: &BlogFilter,
        at: DateTime<Utc>,
    ) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;

        let mut modified = 0;
        for blog in store.values_mut() {
            if !blog.is_deleted && filter.matches(blog) {
                stamp_deleted(blog, at);
                modified += 1;
            }
        }
        Ok(modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog(author_id: Uuid, category: &str, published: bool) -> Blog {
        let mut blog = Blog::new(
            "A".to_owned(),
            "hello world".to_owned(),
            author_id,
            vec![category.to_owned()],
            Vec::new(),
            vec!["rust".to_owned()],
        );
        blog.is_published = published;
        blog
    }

    #[tokio::test]
    async fn find_visible_excludes_unpublished_and_deleted() {
        let repo = InMemoryBlogRepository::new();
        let author = Uuid::new_v4();

        let published = repo.insert(blog(author, "tech", true)).await.unwrap();
        repo.insert(blog(author, "tech", false)).await.unwrap();
        let deleted = repo.insert(blog(author, "tech", true)).await.unwrap();
        repo.soft_delete(deleted.id, Utc::now()).await.unwrap();

        let visible = repo.find_visible(&BlogFilter::default()).await.unwrap();

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, published.id);
    }

    #[tokio::test]
    async fn find_visible_honors_or_combined_filter() {
        let repo = InMemoryBlogRepository::new();
        let author = Uuid::new_v4();

        repo.insert(blog(author, "tech", true)).await.unwrap();
        repo.insert(blog(Uuid::new_v4(), "cooking", true)).await.unwrap();

        // authorId misses the cooking blog, category misses the tech blog;
        // OR semantics returns both.
        let filter = BlogFilter {
            author_id: Some(author),
            category: Some("cooking".to_owned()),
            ..Default::default()
        };
        let visible = repo.find_visible(&filter).await.unwrap();

        assert_eq!(visible.len(), 2);
    }

    #[tokio::test]
    async fn update_applies_patch_atomically_and_bumps_updated_at() {
        let repo = InMemoryBlogRepository::new();
        let inserted = repo.insert(blog(Uuid::new_v4(), "tech", false)).await.unwrap();

        let patch = BlogPatch {
            title: Some("B".to_owned()),
            push_tags: Some(vec!["web".to_owned()]),
            ..Default::default()
        };
        let updated = repo.update(inserted.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.title, "B");
        assert_eq!(updated.tags, ["rust", "web"]);
        assert!(updated.updated_at >= inserted.updated_at);
    }

    #[tokio::test]
    async fn soft_delete_is_one_way() {
        let repo = InMemoryBlogRepository::new();
        let inserted = repo.insert(blog(Uuid::new_v4(), "tech", true)).await.unwrap();

        assert!(repo.soft_delete(inserted.id, Utc::now()).await.unwrap());

        let stored = repo.find_by_id(inserted.id).await.unwrap().unwrap();
        assert!(stored.is_deleted);
        assert!(!stored.is_published);
        assert!(stored.deleted_at.is_some());

        // Second delete modifies nothing.
        assert!(!repo.soft_delete(inserted.id, Utc::now()).await.unwrap());
    }

    #[tokio::test]
    async fn soft_delete_many_counts_only_live_matches() {
        let repo = InMemoryBlogRepository::new();
        let author = Uuid::new_v4();

        repo.insert(blog(author, "tech", true)).await.unwrap();
        repo.insert(blog(author, "tech", false)).await.unwrap();
        let gone = repo.insert(blog(author, "tech", true)).await.unwrap();
        repo.soft_delete(gone.id, Utc::now()).await.unwrap();

        let filter = BlogFilter {
            author_id: Some(author),
            ..Default::default()
        };
        let modified = repo.soft_delete_many(&filter, Utc::now()).await.unwrap();

        assert_eq!(modified, 2);
    }
}
