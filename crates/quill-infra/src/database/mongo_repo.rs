//! MongoDB repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Document, doc};
use mongodb::options::ReturnDocument;
use uuid::Uuid;

use quill_core::domain::{Author, Blog};
use quill_core::error::RepoError;
use quill_core::ports::{AuthorRepository, BlogFilter, BlogPatch, BlogRepository};

use super::connection::MongoConnection;
use super::document::{AuthorDocument, BlogDocument};

/// MongoDB author repository.
pub struct MongoAuthorRepository {
    collection: Collection<AuthorDocument>,
}

impl MongoAuthorRepository {
    pub fn new(conn: &MongoConnection) -> Self {
        Self {
            collection: conn.db.collection("authors"),
        }
    }
}

#[async_trait]
impl AuthorRepository for MongoAuthorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError> {
        let found = self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        found.map(Author::try_from).transpose()
    }

    async fn insert(&self, author: Author) -> Result<Author, RepoError> {
        self.collection
            .insert_one(AuthorDocument::from(author.clone()))
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(author)
    }
}

/// MongoDB blog repository.
pub struct MongoBlogRepository {
    collection: Collection<BlogDocument>,
}

impl MongoBlogRepository {
    pub fn new(conn: &MongoConnection) -> Self {
        Self {
            collection: conn.db.collection("blogs"),
        }
    }
}

/// The OR-combined branches for the provided filter dimensions. Equality
/// against an array field matches by containment, so the array dimensions
/// need no operator.
fn or_branches(filter: &BlogFilter) -> Option<Vec<Document>> {
    let mut or = Vec::new();

    if let Some(author_id) = filter.author_id {
        or.push(doc! { "author_id": author_id.to_string() });
    }
    if let Some(category) = &filter.category {
        or.push(doc! { "category": category.clone() });
    }
    if let Some(tags) = &filter.tags {
        or.push(doc! { "tags": tags.clone() });
    }
    if let Some(subcategory) = &filter.subcategory {
        or.push(doc! { "subcategory": subcategory.clone() });
    }
    if let Some(published) = filter.is_published {
        or.push(doc! { "is_published": published });
    }

    (!or.is_empty()).then_some(or)
}

/// Query for blogs that are visible to readers: not deleted, published, and
/// matching the filter.
fn visibility_query(filter: &BlogFilter) -> Document {
    let mut query = doc! { "is_deleted": false, "is_published": true };
    if let Some(or) = or_branches(filter) {
        query.insert("$or", or);
    }
    query
}

/// One merge update for the whole patch: scalar replacements under `$set`,
/// array appends under `$push`.
fn update_document(patch: &BlogPatch, now: DateTime<Utc>) -> Document {
    let mut set = doc! { "updated_at": now.timestamp_millis() };
    if let Some(title) = &patch.title {
        set.insert("title", title.clone());
    }
    if let Some(body) = &patch.body {
        set.insert("body", body.clone());
    }
    if let Some(published) = patch.is_published {
        set.insert("is_published", published);
    }
    if let Some(at) = patch.published_at {
        set.insert("published_at", at.timestamp_millis());
    }

    let mut push = Document::new();
    if let Some(tags) = &patch.push_tags {
        push.insert("tags", doc! { "$each": tags.clone() });
    }
    if let Some(category) = &patch.push_category {
        push.insert("category", doc! { "$each": category.clone() });
    }
    if let Some(subcategory) = &patch.push_subcategory {
        push.insert("subcategory", doc! { "$each": subcategory.clone() });
    }

    let mut update = doc! { "$set": set };
    if !push.is_empty() {
        update.insert("$push", push);
    }
    update
}

fn soft_delete_update(at: DateTime<Utc>) -> Document {
    doc! {
        "$set": {
            "is_deleted": true,
            "is_published": false,
            "deleted_at": at.timestamp_millis(),
            "updated_at": at.timestamp_millis(),
        }
    }
}

#[async_trait]
impl BlogRepository for MongoBlogRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        let found = self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        found.map(Blog::try_from).transpose()
    }

    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError> {
        self.collection
            .insert_one(BlogDocument::from(blog.clone()))
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(blog)
    }

    async fn find_visible(&self, filter: &BlogFilter) -> Result<Vec<Blog>, RepoError> {
        let cursor = self
            .collection
            .find(visibility_query(filter))
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let docs: Vec<BlogDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        docs.into_iter().map(Blog::try_from).collect()
    }

    async fn update(&self, id: Uuid, patch: BlogPatch) -> Result<Option<Blog>, RepoError> {
        let updated = self
            .collection
            .find_one_and_update(
                doc! { "_id": id.to_string() },
                update_document(&patch, Utc::now()),
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        updated.map(Blog::try_from).transpose()
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, RepoError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id.to_string(), "is_deleted": false },
                soft_delete_update(at),
            )
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.modified_count > 0)
    }

    async fn soft_delete_many(
        &self,
        filter: &BlogFilter,
        at: DateTime<Utc>,
    ) -> Result<u64, RepoError> {
        let mut query = doc! { "is_deleted": false };
        if let Some(or) = or_branches(filter) {
            query.insert("$or", or);
        }

        let result = self
            .collection
            .update_many(query, soft_delete_update(at))
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.modified_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_queries_all_visible_blogs() {
        let query = visibility_query(&BlogFilter::default());

        assert_eq!(query, doc! { "is_deleted": false, "is_published": true });
    }

    #[test]
    fn provided_dimensions_become_or_branches() {
        let author_id = Uuid::new_v4();
        let filter = BlogFilter {
            author_id: Some(author_id),
            category: Some("tech".to_owned()),
            ..Default::default()
        };

        let query = visibility_query(&filter);

        assert_eq!(
            query,
            doc! {
                "is_deleted": false,
                "is_published": true,
                "$or": [
                    { "author_id": author_id.to_string() },
                    { "category": "tech" },
                ],
            }
        );
    }

    #[test]
    fn patch_splits_into_set_and_push() {
        let now = Utc::now();
        let patch = BlogPatch {
            title: Some("B".to_owned()),
            push_tags: Some(vec!["rust".to_owned(), "web".to_owned()]),
            ..Default::default()
        };

        let update = update_document(&patch, now);

        assert_eq!(
            update,
            doc! {
                "$set": { "updated_at": now.timestamp_millis(), "title": "B" },
                "$push": { "tags": { "$each": ["rust", "web"] } },
            }
        );
    }

    #[test]
    fn publish_patch_stamps_published_at_in_the_same_update() {
        let now = Utc::now();
        let patch = BlogPatch {
            is_published: Some(true),
            published_at: Some(now),
            ..Default::default()
        };

        let update = update_document(&patch, now);
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get_bool("is_published").unwrap(), true);
        assert_eq!(
            set.get_i64("published_at").unwrap(),
            now.timestamp_millis()
        );
    }

    #[test]
    fn soft_delete_clears_publication() {
        let now = Utc::now();
        let update = soft_delete_update(now);
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get_bool("is_deleted").unwrap(), true);
        assert_eq!(set.get_bool("is_published").unwrap(), false);
        assert_eq!(set.get_i64("deleted_at").unwrap(), now.timestamp_millis());
    }
}
