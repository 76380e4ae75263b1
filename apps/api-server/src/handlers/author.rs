//! Author handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::Author;
use quill_shared::ApiResponse;
use quill_shared::dto::{AuthorResponse, CreateAuthorRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(super) fn author_response(author: Author) -> AuthorResponse {
    AuthorResponse {
        id: author.id,
        name: author.name,
        email: author.email,
        created_at: author.created_at,
    }
}

/// POST /api/authors
pub async fn create_author(
    state: web::Data<AppState>,
    body: web::Json<CreateAuthorRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    let Some(name) = req.name.filter(|n| !n.trim().is_empty()) else {
        return Err(AppError::BadRequest("Name is required".to_string()));
    };
    let Some(email) = req.email.filter(|e| e.contains('@')) else {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    };

    let author = state.authors.insert(Author::new(name, email)).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(author_response(author))))
}
