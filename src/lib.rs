//! Comments API: read-by-id and create routes for the `comments` resource.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{AddSchema, ResourceConfig, Settings};
pub use error::{AppError, ConfigError};
pub use model::{Comment, NewComment};
pub use routes::{app_router, comment_routes, common_routes};
pub use service::CommentService;
pub use state::AppState;
pub use store::{ensure_comments_table, ensure_database_exists, CommentStore, MemoryCommentStore, PgCommentStore};
