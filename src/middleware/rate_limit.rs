//! Rate limiting middleware

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use redis::AsyncCommands;
use tracing::warn;

use crate::{
    constants::{rate_limits, redis_keys, API_BASE_PATH},
    error::AppError,
    middleware::client_ip::ClientIp,
    state::AppState,
};

/// Fixed-window limit for one path bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub bucket: &'static str,
    pub max_requests: i64,
    pub window_secs: i64,
}

/// Rate limit middleware
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    request: Request<Body>,
    next: Next,
) -> Response {
    let limit = rate_limit_for(request.uri().path());
    let ip = ip.unwrap_or_else(|| "unknown".to_string());
    let key = format!("{}:{}:{}", redis_keys::RATE_LIMIT, limit.bucket, ip);
    let mut redis = state.redis();

    // A Redis outage should not take the API down with it
    let count: i64 = match redis.incr(&key, 1).await {
        Ok(count) => count,
        Err(e) => {
            warn!(error = %e, "Rate limit counter unavailable");
            return next.run(request).await;
        }
    };

    if count == 1 {
        let _: Result<(), _> = redis.expire(&key, limit.window_secs).await;
    }

    if count > limit.max_requests {
        warn!(ip = %ip, bucket = limit.bucket, "Rate limit exceeded");
        return AppError::TooManyRequests
            .with_details(serde_json::json!({ "retry_after_secs": limit.window_secs }))
            .into_response();
    }

    next.run(request).await
}

/// Pick the limit for a request path
pub fn rate_limit_for(path: &str) -> RateLimit {
    let relative = path.strip_prefix(API_BASE_PATH).unwrap_or(path);

    if relative.starts_with("/auth") {
        RateLimit {
            bucket: "auth",
            max_requests: rate_limits::AUTH_MAX_REQUESTS,
            window_secs: rate_limits::AUTH_WINDOW_SECS,
        }
    } else if relative.starts_with("/submissions") {
        RateLimit {
            bucket: "submissions",
            max_requests: rate_limits::SUBMISSION_MAX_REQUESTS,
            window_secs: rate_limits::SUBMISSION_WINDOW_SECS,
        }
    } else if relative.starts_with("/inquiries") {
        RateLimit {
            bucket: "inquiries",
            max_requests: rate_limits::INQUIRY_MAX_REQUESTS,
            window_secs: rate_limits::INQUIRY_WINDOW_SECS,
        }
    } else {
        RateLimit {
            bucket: "general",
            max_requests: rate_limits::GENERAL_MAX_REQUESTS,
            window_secs: rate_limits::GENERAL_WINDOW_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets() {
        assert_eq!(rate_limit_for("/api/v1/auth/login").bucket, "auth");
        assert_eq!(rate_limit_for("/api/v1/submissions").bucket, "submissions");
        assert_eq!(rate_limit_for("/api/v1/inquiries").max_requests, 3);
        assert_eq!(rate_limit_for("/api/v1/contests").bucket, "general");
        assert_eq!(rate_limit_for("/health").bucket, "general");
    }
}
