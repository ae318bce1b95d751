use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const EMAILS_ROUTE: &str = "/emails";

pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting resend testing server on {host}:{port}");
    info!("Resend endpoint: http://{host}:{port}");
    info!("Api key: {api_key:?}");
    info!("Accepted emails are listed at http://{host}:{port}{EMAILS_ROUTE}");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    serve(listener, api_key).await
}

/// Serve the fake resend api on an already bound listener.
pub async fn serve(listener: TcpListener, api_key: String) -> anyhow::Result<()> {
    axum::serve(listener, router(api_key))
        .await
        .context("Failed to start HTTP server")
}

pub fn router(api_key: String) -> Router {
    Router::new()
        .route("/", routing::get(index))
        .route(
            EMAILS_ROUTE,
            routing::get(list_emails).post(send_email).delete(clear_emails),
        )
        .with_state(Arc::new(StateInner {
            api_key,
            emails: Default::default(),
        }))
}

type AppState = State<Arc<StateInner>>;
struct StateInner {
    api_key: String,
    emails: RwLock<Vec<SentEmail>>,
}

/// An email accepted by the fake resend api.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmail {
    pub id: Uuid,
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    pub reply_to: Option<String>,
}

#[derive(Deserialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: Option<String>,
    text: Option<String>,
    reply_to: Option<String>,
}

async fn index() -> Json<serde_json::Value> {
    Json(json!({ "name": "climpro-testing resend" }))
}

async fn send_email(
    state: AppState,
    headers: HeaderMap,
    Json(request): Json<SendEmailRequest>,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    match authorization {
        None => return error(StatusCode::UNAUTHORIZED, "missing_api_key"),
        Some(key) if key != state.api_key => {
            return error(StatusCode::FORBIDDEN, "invalid_api_key")
        }
        Some(_) => {}
    }

    if request.from.is_empty()
        || request.to.is_empty()
        || request.subject.is_empty()
        || (request.html.is_none() && request.text.is_none())
    {
        return error(StatusCode::UNPROCESSABLE_ENTITY, "validation_error");
    }

    let email = SentEmail {
        id: Uuid::new_v4(),
        from: request.from,
        to: request.to,
        subject: request.subject,
        html: request.html,
        text: request.text,
        reply_to: request.reply_to,
    };
    info!(id = %email.id, to = ?email.to, subject = %email.subject, "email accepted");

    let id = email.id;
    state.emails.write().await.push(email);

    Json(json!({ "id": id })).into_response()
}

async fn list_emails(state: AppState) -> Json<Vec<SentEmail>> {
    Json(state.emails.read().await.clone())
}

async fn clear_emails(state: AppState) -> StatusCode {
    state.emails.write().await.clear();
    StatusCode::NO_CONTENT
}

fn error(status: StatusCode, name: &str) -> Response {
    (
        status,
        Json(json!({ "statusCode": status.as_u16(), "name": name, "message": name })),
    )
        .into_response()
}
