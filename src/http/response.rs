//! Response bodies.
//!
//! # Responsibilities
//! - Describe a recognized route as JSON
//! - Map routing errors to HTTP status codes
//!
//! # Design Decisions
//! - An unmatched request (including one on the wrong subdomain) is a 404
//! - The extracted subdomain is echoed in every body

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::routing::pattern::Params;
use crate::routing::router::RouteMatch;

/// Body returned for a recognized request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecognizedRoute {
    /// Name of the matched rule, if it has one.
    pub route: Option<String>,
    pub controller: Option<String>,
    pub action: Option<String>,
    pub params: Params,
    pub subdomain: String,
    /// Canonical URL of the matched named route.
    pub url: Option<String>,
}

impl RecognizedRoute {
    pub fn new(matched: &RouteMatch<'_>, subdomain: &str, url: Option<String>) -> Self {
        Self {
            route: matched.rule.name().map(str::to_string),
            controller: matched.params.get("controller").cloned(),
            action: matched.params.get("action").cloned(),
            params: matched.params.clone(),
            subdomain: subdomain.to_string(),
            url,
        }
    }
}

/// Body returned when recognition fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub subdomain: Option<String>,
}

/// A routing error rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    pub error: RoutingError,
    pub subdomain: Option<String>,
}

impl ApiError {
    pub fn new(error: RoutingError, subdomain: Option<String>) -> Self {
        Self { error, subdomain }
    }

    pub fn status(&self) -> StatusCode {
        match self.error {
            RoutingError::NoRouteMatches { .. } | RoutingError::UnknownRoute(_) => {
                StatusCode::NOT_FOUND
            }
            RoutingError::InvalidHost(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.error.to_string(),
            subdomain: self.subdomain,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::new(
            RoutingError::NoRouteMatches {
                method: "GET".into(),
                path: "/x".into(),
            },
            Some("www".into()),
        );
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::new(RoutingError::InvalidHost("bad host".into()), None).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::new(RoutingError::MissingHost, None).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
