use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::{error, info, warn};

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let request_id = uuid::Uuid::new_v4();

    let response = next.run(req).await;
    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;

    match status {
        500..=599 => error!(%request_id, %method, %path, status, latency_ms, "Server error"),
        400..=499 => warn!(%request_id, %method, %path, status, latency_ms, "Client error"),
        _ => info!(%request_id, %method, %path, status, latency_ms, "Request completed"),
    }

    response
}
