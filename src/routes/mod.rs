mod comments;
mod common;

pub use comments::{app_router, comment_routes};
pub use common::common_routes;
