//! Domain entities - the core business objects.

mod author;

mod blog;

pub use author::Author;
pub use blog::Blog;
