//! Response envelopes: `{result}` for reads, `{id, result}` for creates, `{message}` for errors.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct ResultBody<T> {
    pub result: T,
}

#[derive(Serialize)]
pub struct CreatedBody<I, T> {
    pub id: I,
    pub result: T,
}

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

pub fn result_ok<T: Serialize>(result: T) -> (StatusCode, Json<ResultBody<T>>) {
    (StatusCode::OK, Json(ResultBody { result }))
}

pub fn created<I: Serialize, T: Serialize>(id: I, result: T) -> (StatusCode, Json<CreatedBody<I, T>>) {
    (StatusCode::CREATED, Json(CreatedBody { id, result }))
}
