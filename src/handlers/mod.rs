//! HTTP handlers for the comments resource.

pub mod comments;
pub use comments::*;
