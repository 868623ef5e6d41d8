//! CommentService: read and create against a `CommentStore`.

mod comments;
mod validation;
pub use comments::CommentService;
pub use validation::RequestValidator;
