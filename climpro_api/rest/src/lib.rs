use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use climpro_core_submission_contracts::SubmissionFeatureService;
use climpro_di::Build;
use climpro_utils::Apply;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

mod extractors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Submission> {
    submission: Submission,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    real_ip_config: Option<Arc<RealIpConfig>>,
    allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone)]
pub struct RealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

#[derive(Debug, Clone)]
enum AllowedOrigins {
    Any,
    List(Arc<[HeaderValue]>),
}

impl RestServerConfig {
    /// `allowed_origins` may contain `*` to allow requests from any origin.
    pub fn new(
        real_ip_config: Option<RealIpConfig>,
        allowed_origins: &[String],
    ) -> anyhow::Result<Self> {
        let allowed_origins = if allowed_origins.iter().any(|origin| origin == "*") {
            AllowedOrigins::Any
        } else {
            allowed_origins
                .iter()
                .map(|origin| {
                    origin
                        .parse()
                        .with_context(|| format!("Invalid allowed origin {origin:?}"))
                })
                .collect::<anyhow::Result<_>>()
                .map(AllowedOrigins::List)?
        };

        Ok(Self {
            real_ip_config: real_ip_config.map(Into::into),
            allowed_origins,
        })
    }
}

impl<Submission> RestServer<Submission>
where
    Submission: SubmissionFeatureService,
{
    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;

        info!("Listening on http://{}", listener.local_addr()?);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .context("Failed to start HTTP server")
    }

    pub fn router(self) -> Router<()> {
        let allow_origin = match self.config.allowed_origins {
            AllowedOrigins::Any => AllowOrigin::any(),
            AllowedOrigins::List(origins) => AllowOrigin::list(origins.iter().cloned()),
        };
        let cors = CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::POST])
            .allow_headers([header::CONTENT_TYPE]);

        Router::new()
            .merge(routes::submission::router(self.submission.into()))
            .apply(middlewares::panic_handler::add)
            .apply(middlewares::trace::add)
            .apply(middlewares::client_ip::add(self.config.real_ip_config))
            .apply(middlewares::request_id::add)
            .layer(cors)
    }
}
