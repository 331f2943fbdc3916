//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Extract routing-relevant information (method, scheme, host, path)
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The `Host` header wins over the URI authority; HTTP/2 requests carry the
//!   host only in the URI

use axum::http::{header, HeaderMap, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::error::Result;
use crate::routing::environment::RequestEnvironment;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Makes a fresh UUID v4 request ID for requests that arrive without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Request ID of a request, if the request ID layer has run.
pub fn request_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
}

impl RequestEnvironment {
    /// Routing view of an HTTP request.
    pub fn from_request<B>(request: &Request<B>) -> Result<Self> {
        let host = request
            .headers()
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .or_else(|| request.uri().authority().map(|authority| authority.as_str()))
            .unwrap_or_default();

        let scheme = request
            .headers()
            .get("x-forwarded-proto")
            .and_then(|value| value.to_str().ok())
            .or_else(|| request.uri().scheme_str())
            .unwrap_or("http");

        Ok(RequestEnvironment::new(request.method().clone(), host, request.uri().path())?
            .with_scheme(scheme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    #[test]
    fn test_environment_from_host_header() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/items?page=2")
            .header(header::HOST, "Admin.example.com:8080")
            .body(())
            .unwrap();

        let env = RequestEnvironment::from_request(&request).unwrap();
        assert_eq!(env.method, Method::POST);
        assert_eq!(env.subdomain, "admin");
        assert_eq!(env.port, Some(8080));
        assert_eq!(env.path, "/items");
        assert_eq!(env.scheme, "http");
    }

    #[test]
    fn test_environment_from_uri_authority() {
        let request = Request::builder()
            .uri("https://support.example.com/tickets")
            .body(())
            .unwrap();

        let env = RequestEnvironment::from_request(&request).unwrap();
        assert_eq!(env.subdomain, "support");
        assert_eq!(env.scheme, "https");
    }

    #[test]
    fn test_forwarded_proto() {
        let request = Request::builder()
            .uri("/")
            .header(header::HOST, "www.example.com")
            .header("x-forwarded-proto", "https")
            .body(())
            .unwrap();

        assert_eq!(RequestEnvironment::from_request(&request).unwrap().scheme, "https");
    }

    #[test]
    fn test_make_request_uuid() {
        let request = Request::new(());
        let id = MakeRequestUuid.make_request_id(&request).unwrap();
        let value = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(value).is_ok());
    }
}
