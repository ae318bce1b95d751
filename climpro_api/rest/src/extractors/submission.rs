use std::convert::Infallible;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use tracing::debug;

use crate::models::submission::ApiSubmissionForm;

/// Extract a contact form submission from a json or urlencoded request body.
///
/// A missing or malformed body is treated as a submission without any fields.
pub struct SubmissionPayload(pub ApiSubmissionForm);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for SubmissionPayload {
    type Rejection = Infallible;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let urlencoded = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|x| x.to_str().ok())
            .is_some_and(|x| x.starts_with("application/x-www-form-urlencoded"));

        let result = if urlencoded {
            Form::<ApiSubmissionForm>::from_request(request, state)
                .await
                .map(|Form(form)| form)
                .map_err(|err| err.body_text())
        } else {
            match Bytes::from_request(request, state).await {
                Ok(body) => serde_json::from_slice(&body).map_err(|err| err.to_string()),
                Err(err) => Err(err.body_text()),
            }
        };

        Ok(Self(result.unwrap_or_else(|err| {
            debug!("failed to parse submission payload: {err}");
            Default::default()
        })))
    }
}
