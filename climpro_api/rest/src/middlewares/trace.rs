use std::time::Duration;

use axum::{
    extract::{MatchedPath, Request},
    response::Response,
    Router,
};
use tracing::{debug, info, Span};

use super::{client_ip::ClientIp, request_id::RequestId};

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        tower_http::trace::TraceLayer::new_for_http()
            .make_span_with(make_span)
            .on_request(on_request)
            .on_response(on_response)
            .on_body_chunk(())
            .on_eos(())
            .on_failure(()),
    )
}

fn make_span(request: &Request) -> Span {
    let method = request.method();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);
    let client_ip = request.extensions().get::<ClientIp>().map(|ClientIp(ip)| ip);
    let request_id = request.extensions().get::<RequestId>();

    tracing::info_span!(
        "http-request",
        %method,
        route,
        client_ip = client_ip.map(tracing::field::display),
        request_id = request_id.map(tracing::field::display),
    )
}

fn on_request(_request: &Request, _span: &Span) {
    debug!("started processing request")
}

/// Successful requests are only logged at debug level.
fn on_response(response: &Response, latency: Duration, _span: &Span) {
    let status = response.status();
    let latency_ms = latency.as_millis();
    if status.is_success() {
        debug!(latency_ms, %status, "finished processing request");
    } else {
        info!(latency_ms, %status, "finished processing request");
    }
}
