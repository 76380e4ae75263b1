//! Blog handlers.
//!
//! Request validation, filter/patch construction, and the status mapping of
//! the blog API. Storage is reached only through the repository ports held in
//! [`AppState`].

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::Blog;
use quill_core::ports::{BlogFilter, BlogPatch};
use quill_core::validate;
use quill_shared::ApiResponse;
use quill_shared::dto::{
    AuthorResponse, BlogResponse, CreateBlogRequest, DeleteBlogsQuery, ListBlogsQuery,
    UpdateBlogRequest,
};

use super::author::author_response;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn blog_response(blog: Blog, author: Option<AuthorResponse>) -> BlogResponse {
    BlogResponse {
        id: blog.id,
        title: blog.title,
        body: blog.body,
        author_id: blog.author_id,
        author,
        category: blog.category,
        subcategory: blog.subcategory,
        tags: blog.tags,
        is_published: blog.is_published,
        is_deleted: blog.is_deleted,
        published_at: blog.published_at,
        deleted_at: blog.deleted_at,
        created_at: blog.created_at,
        updated_at: blog.updated_at,
    }
}

fn parse_author_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Enter a valid author Id".to_string()))
}

fn parse_blog_id(raw: &str) -> AppResult<Uuid> {
    // A malformed id can never name a blog, so it reads as "not found".
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Enter a valid blog Id".to_string()))
}

/// POST /api/blogs
pub async fn create_blog(
    state: web::Data<AppState>,
    body: web::Json<CreateBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.is_empty() {
        return Err(AppError::BadRequest(
            "Data is required to create a blog".to_string(),
        ));
    }

    // Validate presence of the required fields
    let Some(title) = req.title else {
        return Err(AppError::BadRequest("Title of blog is required".to_string()));
    };
    let Some(blog_body) = req.body else {
        return Err(AppError::BadRequest(
            "Description of blog is required".to_string(),
        ));
    };
    let Some(author_id) = req.author_id else {
        return Err(AppError::BadRequest("Author ID is required".to_string()));
    };
    let Some(category) = req.category else {
        return Err(AppError::BadRequest(
            "Category of blog is required".to_string(),
        ));
    };
    let subcategory = req.subcategory.unwrap_or_default();
    let tags = req.tags.unwrap_or_default();

    // Everything except the title is digit-checked
    if validate::contains_digit(&blog_body)
        || validate::any_contains_digit(&tags)
        || validate::any_contains_digit(&category)
        || validate::any_contains_digit(&subcategory)
    {
        return Err(DomainError::Validation("Data must not contain numbers".to_string()).into());
    }

    // The referenced author must exist before the blog does
    let author_id = parse_author_id(&author_id)?;
    let author = state
        .authors
        .find_by_id(author_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No such author exists".to_string()))?;

    let blog = state
        .blogs
        .insert(Blog::new(
            title,
            blog_body,
            author.id,
            category,
            subcategory,
            tags,
        ))
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(blog_response(blog, None))))
}

/// GET /api/blogs
pub async fn list_blogs(
    state: web::Data<AppState>,
    query: web::Query<ListBlogsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    if validate::any_contains_digit(
        [&query.category, &query.subcategory, &query.tags]
            .into_iter()
            .flatten(),
    ) {
        return Err(DomainError::Validation("Data should not contain numbers".to_string()).into());
    }

    let author_id = query
        .author_id
        .as_deref()
        .map(parse_author_id)
        .transpose()?;

    let filter = BlogFilter {
        author_id,
        category: query.category,
        subcategory: query.subcategory,
        tags: query.tags,
        is_published: None,
    };

    let blogs = state.blogs.find_visible(&filter).await?;
    if blogs.is_empty() {
        return Err(AppError::NotFound("No such blog exists".to_string()));
    }

    // Enrich each entry with its resolved author; authors repeat across
    // blogs, so resolve each one once.
    let mut authors: HashMap<Uuid, AuthorResponse> = HashMap::new();
    let mut data = Vec::with_capacity(blogs.len());
    for blog in blogs {
        let author = match authors.get(&blog.author_id) {
            Some(author) => Some(author.clone()),
            None => {
                let found = state
                    .authors
                    .find_by_id(blog.author_id)
                    .await?
                    .map(author_response);
                if let Some(author) = &found {
                    authors.insert(blog.author_id, author.clone());
                }
                found
            }
        };
        data.push(blog_response(blog, author));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(data)))
}

/// PUT /api/blogs/{blogId}
pub async fn update_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateBlogRequest>,
) -> AppResult<HttpResponse> {
    let blog_id = parse_blog_id(&path.into_inner())?;

    let blog = state
        .blogs
        .find_by_id(blog_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No such blog exists".to_string()))?;
    if blog.is_deleted {
        return Err(AppError::NotFound("Blog is deleted".to_string()));
    }

    let req = body.into_inner();

    if req.is_empty() {
        return Err(AppError::BadRequest(
            "Data is required to update a blog".to_string(),
        ));
    }

    // Immutable fields are rejected outright, whatever else the patch holds
    if req.names_immutable_field() {
        return Err(DomainError::Forbidden("Action is forbidden".to_string()).into());
    }

    // Every recognized field except the title is digit-checked
    if req.body.as_deref().is_some_and(validate::contains_digit)
        || req.tags.as_deref().is_some_and(validate::any_contains_digit)
        || req
            .category
            .as_deref()
            .is_some_and(validate::any_contains_digit)
        || req
            .subcategory
            .as_deref()
            .is_some_and(validate::any_contains_digit)
    {
        return Err(DomainError::Validation("Data should not contain numbers".to_string()).into());
    }

    let mut patch = BlogPatch {
        title: req.title,
        body: req.body,
        is_published: req.is_published,
        push_tags: req.tags,
        push_category: req.category,
        push_subcategory: req.subcategory,
        published_at: None,
    };

    // Publishing for the first time stamps published_at within the same
    // update; republishing or unpublishing never touches it.
    if !blog.is_published && patch.is_published == Some(true) {
        patch.published_at = Some(Utc::now());
    }

    let updated = state
        .blogs
        .update(blog_id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("No such blog exists".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(blog_response(updated, None))))
}

/// DELETE /api/blogs/{blogId}
pub async fn delete_blog_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let blog_id = parse_blog_id(&path.into_inner())?;

    let blog = state
        .blogs
        .find_by_id(blog_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No such blog found".to_string()))?;
    if blog.is_deleted {
        return Err(AppError::NotFound("Blog already deleted".to_string()));
    }

    if !state.blogs.soft_delete(blog_id, Utc::now()).await? {
        // Lost the race with a concurrent delete.
        return Err(AppError::NotFound("Blog already deleted".to_string()));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::ok_with_message(
        "Blog is deleted successfully",
    )))
}

/// DELETE /api/blogs
pub async fn delete_blogs(
    state: web::Data<AppState>,
    query: web::Query<DeleteBlogsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    if query.is_empty() {
        return Err(AppError::BadRequest(
            "Details are needed to delete a blog".to_string(),
        ));
    }

    if validate::any_contains_digit(
        [&query.category, &query.subcategory, &query.tags]
            .into_iter()
            .flatten(),
    ) {
        return Err(DomainError::Validation("Data should not contain numbers".to_string()).into());
    }

    let author_id = query
        .author_id
        .as_deref()
        .map(parse_author_id)
        .transpose()?;

    let filter = BlogFilter {
        author_id,
        category: query.category,
        subcategory: query.subcategory,
        tags: query.tags,
        is_published: query.is_published,
    };

    let modified = state.blogs.soft_delete_many(&filter, Utc::now()).await?;
    if modified == 0 {
        return Err(AppError::NotFound(
            "No such blog exists or it may already be deleted".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::ok_with_message(
        "The blogs have been deleted successfully",
    )))
}
