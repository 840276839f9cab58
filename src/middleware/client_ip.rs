//! Client address extraction

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};

use crate::state::AppState;

/// Client IP: the peer address, or the first `X-Forwarded-For` hop when
/// `TRUST_PROXY_HEADERS` is enabled
#[derive(Debug, Clone, Default)]
pub struct ClientIp(pub Option<String>);

impl<S> FromRequestParts<S> for ClientIp
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Ok(ClientIp(resolve_client_ip(
            &parts.headers,
            peer,
            app_state.config().server.trust_proxy_headers,
        )))
    }
}

/// Pick the client address; forwarding headers are ignored unless trusted
pub fn resolve_client_ip(
    headers: &HeaderMap,
    peer: Option<String>,
    trust_proxy_headers: bool,
) -> Option<String> {
    if trust_proxy_headers {
        forwarded_for(headers).or(peer)
    } else {
        peer
    }
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn forwarded_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers
    }

    #[test]
    fn test_first_forwarded_hop_wins() {
        assert_eq!(forwarded_for(&forwarded_headers()).as_deref(), Some("203.0.113.7"));
        assert_eq!(forwarded_for(&HeaderMap::new()), None);
    }

    #[test]
    fn test_forwarded_header_ignored_unless_trusted() {
        let peer = Some("198.51.100.20".to_string());

        assert_eq!(
            resolve_client_ip(&forwarded_headers(), peer.clone(), false).as_deref(),
            Some("198.51.100.20")
        );
        assert_eq!(
            resolve_client_ip(&forwarded_headers(), peer.clone(), true).as_deref(),
            Some("203.0.113.7")
        );
        assert_eq!(
            resolve_client_ip(&HeaderMap::new(), peer, true).as_deref(),
            Some("198.51.100.20")
        );
    }
}
