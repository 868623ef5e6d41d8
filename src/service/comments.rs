use crate::config::AddSchema;
use crate::error::AppError;
use crate::model::Comment;
use crate::service::RequestValidator;
use crate::store::CommentStore;
use serde_json::Value;

pub struct CommentService;

impl CommentService {
    /// Fetch one comment by primary key. Missing rows are `AppError::NotFound`.
    pub async fn read(store: &dyn CommentStore, id: i32) -> Result<Comment, AppError> {
        store.get(id).await?.ok_or(AppError::NotFound)
    }

    /// Load the body through the add schema and persist it. Returns the stored row.
    pub async fn create(store: &dyn CommentStore, schema: &AddSchema, body: Value) -> Result<Comment, AppError> {
        let new_comment = RequestValidator::load(&body, schema)?;
        store.add(new_comment).await
    }
}
