//! Host decision for generated URLs.
//!
//! A route declared in a single-label subdomain scope carries a subdomain
//! requirement. When the host a URL would be generated for sits on another
//! subdomain, the host is rewritten and the URL forced absolute so the link
//! actually reaches the route.
//!
//! An IP-literal host has no subdomain to replace. It is kept as is and the
//! URL is not forced absolute.

use crate::routing::environment::{extract_subdomain, is_ip_literal};

/// Outcome of [`HostResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDecision {
    /// Host (with port, if any) the URL should point at.
    pub host: Option<String>,
    /// The URL must be absolute even if a path was asked for.
    pub force_absolute: bool,
}

/// Stateless host rewriting for URL generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostResolver;

impl HostResolver {
    /// Decide the host for a route with `requirement`, generated while `host`
    /// is the effective host (explicit option, else the current request's).
    ///
    /// - no requirement: host kept verbatim, nothing forced
    /// - requirement equals the host's subdomain: same
    /// - IP-literal host: same
    /// - otherwise: `<requirement>.<base domain>`, forced absolute
    pub fn resolve(requirement: Option<&str>, host: Option<&str>) -> HostDecision {
        let Some(required) = requirement else {
            return HostDecision {
                host: host.map(str::to_string),
                force_absolute: false,
            };
        };

        let Some(current) = host.filter(|host| !host.is_empty()) else {
            // Nowhere to derive a base domain from; the writer reports it.
            return HostDecision {
                host: None,
                force_absolute: true,
            };
        };

        let bare = strip_port(current);
        if is_ip_literal(bare) {
            tracing::debug!(host = %current, subdomain = %required, "IP host cannot carry a subdomain, keeping it");
            return HostDecision {
                host: Some(current.to_string()),
                force_absolute: false,
            };
        }

        let active = extract_subdomain(bare);
        if active.eq_ignore_ascii_case(required) {
            return HostDecision {
                host: Some(current.to_string()),
                force_absolute: false,
            };
        }

        let rewritten = rewrite_subdomain(current, required);
        tracing::debug!(
            from = %current,
            to = %rewritten,
            "Rewriting host for subdomain requirement"
        );
        HostDecision {
            host: Some(rewritten),
            force_absolute: true,
        }
    }
}

/// Replace the first label of `host` with `subdomain`, keeping the port.
///
/// A host without a dot has no label to replace and is prefixed instead.
/// Callers keep IP-literal hosts out of here.
pub fn rewrite_subdomain(host: &str, subdomain: &str) -> String {
    match host.split_once('.') {
        Some((_, base)) => format!("{}.{}", subdomain, base),
        None => format!("{}.{}", subdomain, host),
    }
}

fn strip_port(authority: &str) -> &str {
    match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => host,
        _ => authority,
    }
}
