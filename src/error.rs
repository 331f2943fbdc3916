//! Routing error types.
//!
//! # Design Decisions
//! - One error enum for declaration, recognition and generation
//! - A request whose path matches but whose subdomain does not is reported as
//!   `NoRouteMatches`, exactly like an unknown path

use thiserror::Error;

/// Errors raised while declaring routes, recognizing requests or generating URLs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// A subdomain scope was declared without any label.
    #[error("at least one subdomain must be specified")]
    NoSubdomains,

    /// A path pattern could not be parsed.
    #[error("invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// No rule matched the request's path, method and subdomain.
    #[error("No route matches {path:?} with {method}")]
    NoRouteMatches { method: String, path: String },

    /// URL generation was asked for a route name that was never declared.
    #[error("no route named {0:?}")]
    UnknownRoute(String),

    /// URL generation is missing a value for a required path segment.
    #[error("route {route:?} requires parameter {param:?}")]
    MissingParameter { route: String, param: String },

    /// An absolute URL was required but there is no host to link to.
    #[error("missing host to link to")]
    MissingHost,

    /// A route declaration named an HTTP method that does not exist.
    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),

    /// A host or authority string could not be parsed.
    #[error("invalid host {0:?}")]
    InvalidHost(String),
}

/// Result alias used throughout the routing engine.
pub type Result<T> = std::result::Result<T, RoutingError>;
