//! Comment handlers: read by primary key and create.

use crate::error::AppError;
use crate::response::{created, result_ok};
use crate::service::CommentService;
use crate::state::AppState;
use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// Name the create-failure log line is attributed to.
pub const API_NAME: &str = "ChartCommentsRestApi";

#[derive(Serialize)]
pub struct CommentResult {
    pub id: i32,
    pub comment: String,
}

/// Route ids follow an unsigned decimal `int` converter: anything else does not match, and
/// ids past the column range cannot exist.
fn parse_pk(pk: &str) -> Result<i32, AppError> {
    if pk.is_empty() || !pk.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFound);
    }
    pk.parse::<i32>().map_err(|_| AppError::NotFound)
}

/// GET /api/v1/:resource/:pk/get_comments
pub async fn get_comments(
    State(state): State<AppState>,
    Path(pk): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_pk(&pk)?;
    let comment = CommentService::read(state.store.as_ref(), id).await?;
    Ok(result_ok(CommentResult {
        id: comment.id,
        comment: comment.txt,
    }))
}

/// POST /api/v1/:resource/post_comments
pub async fn post_comments(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let result = match payload {
        Ok(Json(body)) => CommentService::create(state.store.as_ref(), &state.resource.add_schema, body).await,
        Err(JsonRejection::MissingJsonContentType(_)) => return Err(AppError::NotJson),
        Err(rejection @ JsonRejection::BytesRejection(_)) => return Err(AppError::Body(rejection)),
        Err(rejection) => Err(AppError::Validation(rejection.body_text())),
    };
    match result {
        Ok(comment) => Ok(created(comment.id, comment.txt)),
        Err(err) => {
            tracing::error!(
                api = API_NAME,
                resource = %state.resource.name,
                error = ?err,
                "Error creating model {}: {}",
                API_NAME,
                err
            );
            Err(err.into_unprocessable())
        }
    }
}
