use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiResponse;

pub mod submission;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, "Erreur serveur")
}

fn error(code: StatusCode, message: &'static str) -> Response {
    (code, Json(ApiResponse::error(message))).into_response()
}
