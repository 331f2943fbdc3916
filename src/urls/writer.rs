//! Named-route URL generation.
//!
//! # Responsibilities
//! - Fill a named route's pattern from parameters
//! - Apply the host decision for subdomain-bound routes
//! - Render a path or an absolute URL
//!
//! # Design Decisions
//! - The rendering request is an explicit `UrlContext`, never global state
//! - Parameters that are neither path segments nor route defaults become the
//!   query string, in key order
//! - Absolute URLs are assembled with `url::Url`

use std::sync::Arc;

use url::{form_urlencoded, Url};

use crate::error::{Result, RoutingError};
use crate::routing::environment::RequestEnvironment;
use crate::routing::pattern::Params;
use crate::routing::route::RouteRule;
use crate::routing::router::RouteSet;
use crate::urls::host::HostResolver;

/// The request a URL is generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlContext {
    pub protocol: String,
    pub host: String,
    pub port: Option<u16>,
}

impl UrlContext {
    pub fn new(protocol: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            port: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn from_environment(env: &RequestEnvironment) -> Self {
        Self {
            protocol: env.scheme.clone(),
            host: env.host.clone(),
            port: env.port,
        }
    }

    /// `host[:port]`.
    pub fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }
}

/// Per-call generation options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlOptions {
    /// Render a path instead of an absolute URL (may still be forced absolute).
    pub only_path: bool,
    /// Host to link to instead of the context host.
    pub host: Option<String>,
    pub protocol: Option<String>,
    pub anchor: Option<String>,
}

impl UrlOptions {
    pub fn path() -> Self {
        Self {
            only_path: true,
            ..Self::default()
        }
    }

    pub fn url() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }
}

/// Generates URLs for the named routes of a route set.
#[derive(Debug, Clone)]
pub struct UrlWriter {
    routes: Arc<RouteSet>,
    context: Option<UrlContext>,
}

impl UrlWriter {
    pub fn new(routes: Arc<RouteSet>, context: Option<UrlContext>) -> Self {
        Self { routes, context }
    }

    /// Writer for URLs rendered while handling `env`.
    pub fn for_request(routes: Arc<RouteSet>, env: &RequestEnvironment) -> Self {
        Self::new(routes, Some(UrlContext::from_environment(env)))
    }

    pub fn context(&self) -> Option<&UrlContext> {
        self.context.as_ref()
    }

    /// `<name>_url`: always absolute.
    pub fn url_for(&self, name: &str, params: &Params) -> Result<String> {
        self.url_for_with(name, params, &UrlOptions::url())
    }

    /// `<name>_path`: a path, unless the route lives on another subdomain.
    pub fn path_for(&self, name: &str, params: &Params) -> Result<String> {
        self.url_for_with(name, params, &UrlOptions::path())
    }

    pub fn url_for_with(&self, name: &str, params: &Params, options: &UrlOptions) -> Result<String> {
        let rule = self
            .routes
            .named_route(name)
            .ok_or_else(|| RoutingError::UnknownRoute(name.to_string()))?;

        let path = generate_path(name, rule, params)?;
        let query = query_string(rule, params);

        let host = options
            .host
            .clone()
            .or_else(|| self.context.as_ref().map(UrlContext::authority));
        let decision = HostResolver::resolve(rule.requirements().subdomain.as_deref(), host.as_deref());

        if options.only_path && !decision.force_absolute {
            let mut rendered = path;
            if let Some(query) = &query {
                rendered.push('?');
                rendered.push_str(query);
            }
            if let Some(anchor) = &options.anchor {
                rendered.push('#');
                rendered.push_str(anchor);
            }
            return Ok(rendered);
        }

        let host = decision.host.ok_or(RoutingError::MissingHost)?;
        let protocol = options
            .protocol
            .as_deref()
            .or_else(|| self.context.as_ref().map(|context| context.protocol.as_str()))
            .unwrap_or("http");
        let protocol = protocol.trim_end_matches("://");

        let mut url = Url::parse(&format!("{}://{}", protocol, host))
            .map_err(|_| RoutingError::InvalidHost(host.clone()))?;
        url.set_path(&path);
        url.set_query(query.as_deref());
        url.set_fragment(options.anchor.as_deref());
        Ok(url.into())
    }
}

fn generate_path(name: &str, rule: &RouteRule, params: &Params) -> Result<String> {
    let mut merged = rule.defaults().clone();
    merged.extend(params.iter().map(|(key, value)| (key.clone(), value.clone())));
    rule.pattern()
        .generate(&merged)
        .map_err(|param| RoutingError::MissingParameter {
            route: name.to_string(),
            param,
        })
}

fn query_string(rule: &RouteRule, params: &Params) -> Option<String> {
    let segments: Vec<&str> = rule.pattern().param_names().collect();
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in params {
        if segments.contains(&key.as_str()) || rule.defaults().contains_key(key) {
            continue;
        }
        serializer.append_pair(key, value);
        any = true;
    }
    any.then(|| serializer.finish())
}
