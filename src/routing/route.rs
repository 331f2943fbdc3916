//! Route rules.
//!
//! # Responsibilities
//! - Describe one recognizable/generatable route
//! - Carry recognition conditions (method, subdomains)
//! - Carry generation requirements (subdomain)
//!
//! # Design Decisions
//! - Rules are immutable once built; subdomain constraints are attached at
//!   construction from the enclosing scope, never patched in afterwards
//! - Conditions are compiled into matchers at construction

use std::fmt;

use axum::http::Method;

use crate::routing::environment::RequestEnvironment;
use crate::routing::matcher::{AndMatcher, Matcher, MethodMatcher, SubdomainMatcher};
use crate::routing::pattern::{Params, PathPattern};
use crate::routing::subdomain::SubdomainSet;

/// Where a route leads: controller, action, extra defaults and an optional
/// method condition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    pub(crate) controller: Option<String>,
    pub(crate) action: Option<String>,
    pub(crate) defaults: Params,
    pub(crate) method: Option<Method>,
}

impl Endpoint {
    /// An endpoint with no controller or action; both come from the path.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: Some(controller.into()),
            action: Some(action.into()),
            ..Self::default()
        }
    }

    /// Restrict the route to one HTTP method.
    pub fn via(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }
}

/// Recognition conditions of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    pub method: Option<Method>,
    /// Labels the request subdomain must be one of.
    pub subdomains: Option<Vec<String>>,
}

/// Generation requirements of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements {
    /// Subdomain a generated URL must carry.
    pub subdomain: Option<String>,
}

/// A single route in a [`RouteSet`](crate::routing::RouteSet).
#[derive(Debug)]
pub struct RouteRule {
    name: Option<String>,
    pattern: PathPattern,
    defaults: Params,
    conditions: Conditions,
    requirements: Requirements,
    matcher: AndMatcher,
}

impl RouteRule {
    /// Build a rule, attaching the subdomain constraints of the enclosing
    /// scope.
    ///
    /// Every set size yields a recognition condition; only a single-label set
    /// yields a generation requirement.
    pub fn new(
        name: Option<String>,
        pattern: PathPattern,
        defaults: Params,
        method: Option<Method>,
        subdomains: Option<&SubdomainSet>,
    ) -> Self {
        let conditions = Conditions {
            method,
            subdomains: subdomains.map(|set| set.labels().to_vec()),
        };
        let requirements = Requirements {
            subdomain: subdomains.and_then(|set| set.requirement()).map(str::to_string),
        };

        let mut matchers: Vec<Box<dyn Matcher>> = Vec::new();
        if let Some(method) = &conditions.method {
            matchers.push(Box::new(MethodMatcher::new(method.clone())));
        }
        if let Some(labels) = &conditions.subdomains {
            matchers.push(Box::new(SubdomainMatcher::new(labels.clone())));
        }

        Self {
            name,
            pattern,
            defaults,
            conditions,
            requirements,
            matcher: AndMatcher::new(matchers),
        }
    }

    /// Full route name, prefix included (e.g. `admin_users`).
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn defaults(&self) -> &Params {
        &self.defaults
    }

    pub fn controller(&self) -> Option<&str> {
        self.defaults.get("controller").map(String::as_str)
    }

    pub fn action(&self) -> Option<&str> {
        self.defaults.get("action").map(String::as_str)
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    /// Recognize a request against this rule.
    ///
    /// Returns the defaults overlaid with the path parameters.
    pub fn recognize(&self, env: &RequestEnvironment) -> Option<Params> {
        if !self.matcher.matches(env) {
            return None;
        }
        let captured = self.pattern.matches(&env.path)?;
        let mut params = self.defaults.clone();
        params.extend(captured);
        Some(params)
    }
}

impl fmt::Display for RouteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = self
            .conditions
            .method
            .as_ref()
            .map(Method::as_str)
            .unwrap_or("ANY");
        write!(
            f,
            "{:<28} {:<6} {:<36} {{controller: {:?}, action: {:?}}}",
            self.name.as_deref().unwrap_or(""),
            method,
            self.pattern,
            self.controller().unwrap_or(""),
            self.action().unwrap_or(""),
        )?;
        if let Some(subdomains) = &self.conditions.subdomains {
            write!(f, " [subdomains: {}]", subdomains.join(", "))?;
        }
        Ok(())
    }
}
