//! Route lookup.
//!
//! # Responsibilities
//! - Store the rules produced by a draw
//! - Recognize a request environment against them
//! - Look up named routes for URL generation
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) named-route lookup via HashMap
//! - O(n) rule scan in declaration order; first match wins
//! - A subdomain mismatch is reported exactly like an unknown path

use std::collections::HashMap;

use axum::http::Method;

use crate::error::{Result, RoutingError};
use crate::routing::environment::RequestEnvironment;
use crate::routing::mapper::RouteGroupBuilder;
use crate::routing::pattern::{normalize_path, Params};
use crate::routing::route::RouteRule;
use crate::routing::scope::ScopeOptions;

/// A recognized request.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub rule: &'a RouteRule,
    pub params: Params,
}

/// An immutable table of route rules.
#[derive(Debug, Default)]
pub struct RouteSet {
    rules: Vec<RouteRule>,
    named: HashMap<String, usize>,
}

impl RouteSet {
    /// Declare routes through `f` and freeze them into a set.
    ///
    /// Any declaration error (for example a subdomain block without labels)
    /// aborts the draw.
    pub fn draw<F>(f: F) -> Result<Self>
    where
        F: FnOnce(&mut RouteGroupBuilder<'_>) -> Result<()>,
    {
        let mut rules = Vec::new();
        {
            let mut map = RouteGroupBuilder::new(&mut rules, ScopeOptions::default());
            f(&mut map)?;
        }
        Ok(Self::from_rules(rules))
    }

    /// An empty set; every request is unrecognized.
    pub fn empty() -> Self {
        Self::default()
    }

    fn from_rules(rules: Vec<RouteRule>) -> Self {
        let mut named = HashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            if let Some(name) = rule.name() {
                // A later declaration with the same name replaces the earlier one.
                named.insert(name.to_string(), index);
            }
        }
        Self { rules, named }
    }

    /// All rules in declaration order.
    pub fn routes(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn named_route(&self, name: &str) -> Option<&RouteRule> {
        self.named.get(name).map(|&index| &self.rules[index])
    }

    /// Recognize a request environment.
    pub fn recognize(&self, env: &RequestEnvironment) -> Result<RouteMatch<'_>> {
        for rule in &self.rules {
            if let Some(params) = rule.recognize(env) {
                tracing::debug!(
                    route = ?rule.name(),
                    subdomain = %env.subdomain,
                    path = %env.path,
                    "Route recognized"
                );
                return Ok(RouteMatch { rule, params });
            }
        }
        Err(RoutingError::NoRouteMatches {
            method: env.method.to_string(),
            path: normalize_path(&env.path),
        })
    }

    /// Recognize `method host path`, returning only the parameters.
    pub fn recognize_path(&self, method: Method, host: &str, path: &str) -> Result<Params> {
        let env = RequestEnvironment::new(method, host, path)?;
        self.recognize(&env).map(|matched| matched.params)
    }
}
