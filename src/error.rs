//! Typed errors and HTTP mapping.

use crate::response::MessageBody;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("invalid identifier for {key}: '{value}'")]
    InvalidIdentifier { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Not found")]
    NotFound,
    #[error("Request is not JSON")]
    NotJson,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error("{0}")]
    Storage(String),
    /// Body could not be read (e.g. over the size limit); rendered as axum renders it.
    #[error(transparent)]
    Body(JsonRejection),
}

impl AppError {
    /// Collapse any failure into a 422 carrying this error's message.
    pub fn into_unprocessable(self) -> AppError {
        match self {
            AppError::Validation(_) => self,
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Body(rejection) = self {
            return rejection.into_response();
        }
        let status = match &self {
            AppError::Config(_) | AppError::Db(_) | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Body(rejection) => rejection.status(),
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::NotJson => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self, "request failed");
            "Fatal error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(MessageBody { message })).into_response()
    }
}
