//! HTTP handlers and route configuration.

mod author;
mod blog;
mod health;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Blog routes
            .service(
                web::scope("/blogs")
                    .route("", web::post().to(blog::create_blog))
                    .route("", web::get().to(blog::list_blogs))
                    .route("", web::delete().to(blog::delete_blogs))
                    .route("/{blogId}", web::put().to(blog::update_blog))
                    .route("/{blogId}", web::delete().to(blog::delete_blog_by_id)),
            )
            // Author routes
            .service(web::scope("/authors").route("", web::post().to(author::create_author))),
    );
}
