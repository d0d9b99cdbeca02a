//! Rate limiting middleware.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use tracing::warn;

use crate::state::AppState;

/// Fixed-window rate limit keyed by path and client IP.
///
/// Passes everything through when no Redis connection is configured. Redis
/// errors deny the request.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(cache) = state.cache.as_ref() else {
        return next.run(request).await;
    };

    let max_requests = state.config.rate_limit.max_requests;
    let window_seconds = state.config.rate_limit.window_seconds;

    let ip = get_client_ip(&request, connect_info);
    let identifier = format!("{}:{}", request.uri().path(), ip);

    let (count, allowed) = match cache
        .check_rate_limit(&identifier, max_requests, window_seconds)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            warn!("Rate limit check failed, denying request: {}", e);
            return rate_limit_exceeded_response(max_requests, window_seconds);
        }
    };

    if !allowed {
        return rate_limit_exceeded_response(max_requests, window_seconds);
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("X-RateLimit-Limit", HeaderValue::from(max_requests));
    headers.insert(
        "X-RateLimit-Remaining",
        HeaderValue::from(max_requests.saturating_sub(count)),
    );

    response
}

fn get_client_ip(request: &Request<Body>, connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    let header = |name: &str| {
        request
            .headers()
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
    };

    if let Some(ip) = header("X-Forwarded-For").and_then(|v| {
        v.split(',').next().map(|ip| ip.trim().to_string())
    }) {
        return ip;
    }

    if let Some(ip) = header("X-Real-IP") {
        return ip;
    }

    connect_info
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn rate_limit_exceeded_response(max_requests: u64, window_seconds: u64) -> Response {
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        "Too many requests. Please try again later.",
    )
        .into_response();

    let headers = response.headers_mut();
    headers.insert("Retry-After", HeaderValue::from(window_seconds));
    headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));
    headers.insert("X-RateLimit-Limit", HeaderValue::from(max_requests));

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let request = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();

        assert_eq!(get_client_ip(&request, None), "203.0.113.7");
    }

    #[test]
    fn test_unknown_without_any_source() {
        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(get_client_ip(&request, None), "unknown");
    }

    #[test]
    fn test_exceeded_response_headers() {
        let response = rate_limit_exceeded_response(10, 60);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()["Retry-After"], "60");
        assert_eq!(response.headers()["X-RateLimit-Remaining"], "0");
    }
}
