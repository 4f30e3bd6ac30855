use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// How a finished request is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    RateLimited,
    Rejected,
    Completed,
}

impl Outcome {
    pub fn of(status: StatusCode) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS {
            Outcome::RateLimited
        } else if status.is_client_error() || status.is_server_error() {
            Outcome::Rejected
        } else {
            Outcome::Completed
        }
    }
}

/// One log line per request. Must wrap the rate limiter to see its 429s.
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match Outcome::of(status) {
        Outcome::RateLimited => {
            tracing::warn!(client_ip = %addr.ip(), %method, %path, "Rate limited")
        }
        Outcome::Rejected => {
            tracing::warn!(client_ip = %addr.ip(), %method, %path, %status, elapsed_ms, "Request failed")
        }
        Outcome::Completed => {
            tracing::debug!(client_ip = %addr.ip(), %method, %path, %status, elapsed_ms, "Request completed")
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_statuses() {
        assert_eq!(Outcome::of(StatusCode::TOO_MANY_REQUESTS), Outcome::RateLimited);
        assert_eq!(Outcome::of(StatusCode::BAD_REQUEST), Outcome::Rejected);
        assert_eq!(Outcome::of(StatusCode::INTERNAL_SERVER_ERROR), Outcome::Rejected);
        assert_eq!(Outcome::of(StatusCode::CREATED), Outcome::Completed);
    }
}
