//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.
//!
//! # Example
//! ```toml
//! [server]
//! bind_address = "0.0.0.0:8080"
//!
//! [[routes]]
//! type = "subdomain"
//! subdomains = ["admin"]
//!
//!   [[routes.routes]]
//!   type = "resources"
//!   name = "users"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::routing::subdomain::GroupName;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Route declarations, in recognition order.
    pub routes: Vec<RouteDeclaration>,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Total request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format of log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// A single route declaration. Block declarations nest through `routes`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteDeclaration {
    /// Unnamed route.
    Connect {
        path: String,
        #[serde(flatten)]
        endpoint: EndpointConfig,
    },

    /// Named route (`name` gets the scope's name prefix).
    Named {
        name: String,
        path: String,
        #[serde(flatten)]
        endpoint: EndpointConfig,
    },

    /// The `root` route of the enclosing scope.
    Root {
        #[serde(flatten)]
        endpoint: EndpointConfig,
    },

    Namespace {
        name: String,
        #[serde(default)]
        routes: Vec<RouteDeclaration>,
    },

    /// Plural resource.
    Resources {
        name: String,
        #[serde(default)]
        singular: Option<String>,
        #[serde(default)]
        controller: Option<String>,
        #[serde(default)]
        has_many: Vec<String>,
        #[serde(default)]
        routes: Vec<RouteDeclaration>,
    },

    /// Singleton resource.
    Resource {
        name: String,
        #[serde(default)]
        controller: Option<String>,
        #[serde(default)]
        has_many: Vec<String>,
        #[serde(default)]
        routes: Vec<RouteDeclaration>,
    },

    /// Block restricted to one or more subdomains.
    Subdomain {
        subdomains: Vec<String>,
        /// `"x"` names the group, `false` suppresses naming.
        #[serde(default)]
        name: NameConfig,
        #[serde(default)]
        namespace: Option<String>,
        #[serde(default)]
        name_prefix: Option<String>,
        #[serde(default)]
        path_prefix: Option<String>,
        #[serde(default)]
        routes: Vec<RouteDeclaration>,
    },
}

impl RouteDeclaration {
    /// Declarations nested inside this one.
    pub fn children(&self) -> &[RouteDeclaration] {
        match self {
            Self::Namespace { routes, .. }
            | Self::Resources { routes, .. }
            | Self::Resource { routes, .. }
            | Self::Subdomain { routes, .. } => routes,
            Self::Connect { .. } | Self::Named { .. } | Self::Root { .. } => &[],
        }
    }
}

/// Target of a connect/named/root declaration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct EndpointConfig {
    #[serde(default)]
    pub controller: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    /// HTTP method condition (e.g. "GET").
    #[serde(default)]
    pub method: Option<String>,
    /// Extra parameter defaults.
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

/// The `name` option of a subdomain declaration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum NameConfig {
    /// `true` (or absent) keeps the default naming, `false` suppresses it.
    Flag(bool),
    Name(String),
}

impl Default for NameConfig {
    fn default() -> Self {
        NameConfig::Flag(true)
    }
}

impl NameConfig {
    pub fn group_name(&self) -> GroupName {
        match self {
            NameConfig::Flag(true) => GroupName::Default,
            NameConfig::Flag(false) => GroupName::Suppressed,
            NameConfig::Name(name) => GroupName::named(name.clone()),
        }
    }
}
