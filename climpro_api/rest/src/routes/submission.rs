use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use climpro_core_submission_contracts::{SubmissionFeatureService, SubmitError};

use super::{error, internal_server_error};
use crate::{extractors::submission::SubmissionPayload, models::ApiResponse};

pub const ROUTE: &str = "/api/contact";

pub fn router(service: Arc<impl SubmissionFeatureService>) -> Router<()> {
    Router::new()
        .route(ROUTE, routing::post(submit).fallback(method_not_allowed))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl SubmissionFeatureService>>,
    SubmissionPayload(form): SubmissionPayload,
) -> Response {
    match service.submit(form.into()).await {
        Ok(_) => Json(ApiResponse::ok()).into_response(),
        Err(SubmitError::ConsentRequired) => error(StatusCode::BAD_REQUEST, "Consentement requis"),
        Err(SubmitError::MissingRequiredFields) => {
            error(StatusCode::BAD_REQUEST, "Champs requis manquants")
        }
        Err(SubmitError::ContactMethodRequired) => {
            error(StatusCode::BAD_REQUEST, "Email valide OU téléphone requis")
        }
        Err(SubmitError::Send) => internal_server_error(anyhow!(
            "internal notification has been rejected by the delivery service"
        )),
        Err(SubmitError::Other(err)) => internal_server_error(err),
    }
}

async fn method_not_allowed() -> Response {
    (
        [(header::ALLOW, Method::POST.as_str())],
        error(StatusCode::METHOD_NOT_ALLOWED, "Méthode non autorisée"),
    )
        .into_response()
}
