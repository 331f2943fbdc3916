//! Request environment used during recognition.
//!
//! # Responsibilities
//! - Capture the routing-relevant parts of a request (method, host, path)
//! - Extract the subdomain label from the host
//!
//! # Design Decisions
//! - The subdomain is the first dot-delimited label of the lowercased host
//! - The subdomain is extracted whether or not any rule ends up matching
//! - Ports are split off before extraction
//! - IP-literal hosts have no subdomain

use std::net::IpAddr;
use std::str::FromStr;

use axum::http::uri::Authority;
use axum::http::Method;

use crate::error::{Result, RoutingError};

/// Routing view of an incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEnvironment {
    pub method: Method,
    pub scheme: String,
    /// Host without the port.
    pub host: String,
    pub port: Option<u16>,
    pub path: String,
    /// First label of the lowercased host.
    pub subdomain: String,
}

impl RequestEnvironment {
    /// Build an environment for a plain `http` request.
    ///
    /// `host` may carry a port (`admin.example.com:3000`). An empty host is
    /// accepted and yields an empty subdomain.
    pub fn new(method: Method, host: &str, path: &str) -> Result<Self> {
        let (host, port) = split_authority(host)?;
        let subdomain = extract_subdomain(&host);
        Ok(Self {
            method,
            scheme: "http".to_string(),
            host,
            port,
            path: path.to_string(),
            subdomain,
        })
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Host with the port appended when one was given.
    pub fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }
}

/// Extract the subdomain label from a host name.
///
/// IP literals yield an empty subdomain.
pub fn extract_subdomain(host: &str) -> String {
    if is_ip_literal(host) {
        return String::new();
    }
    host.to_lowercase()
        .split('.')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Whether `host` (without port) is an IPv4 or bracketed IPv6 address.
pub fn is_ip_literal(host: &str) -> bool {
    let bare = host
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(host);
    bare.parse::<IpAddr>().is_ok()
}

/// Split `host[:port]` into its parts.
pub fn split_authority(authority: &str) -> Result<(String, Option<u16>)> {
    if authority.is_empty() {
        return Ok((String::new(), None));
    }
    let parsed = Authority::from_str(authority)
        .map_err(|_| RoutingError::InvalidHost(authority.to_string()))?;
    Ok((parsed.host().to_string(), parsed.port_u16()))
}
