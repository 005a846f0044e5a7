use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// One `request_completed` line per request, tagged with the request id the
/// request-id layer already put on the headers.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();

    let started = Instant::now();
    let response = next.run(req).await;
    let status = response.status().as_u16();

    info!(
        target: "metrics",
        method = %method,
        path = %path,
        request_id = %request_id,
        status = %status,
        latency_ms = %started.elapsed().as_millis(),
        "request_completed"
    );

    response
}
