//! Recognition conditions.
//!
//! # Responsibilities
//! - Match the request subdomain against a rule's subdomain condition
//! - Match the request method
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - Subdomain matching is exact label equality, no wildcards
//! - Absent condition = always matches (wildcard)
//! - HEAD requests satisfy GET conditions

use axum::http::Method;

use crate::routing::environment::RequestEnvironment;

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, env: &RequestEnvironment) -> bool;
}

/// Matches the request subdomain against a set of labels.
#[derive(Debug, Clone)]
pub struct SubdomainMatcher {
    labels: Vec<String>,
}

impl SubdomainMatcher {
    pub fn new(labels: impl Into<Vec<String>>) -> Self {
        Self {
            labels: labels.into(),
        }
    }
}

impl Matcher for SubdomainMatcher {
    fn matches(&self, env: &RequestEnvironment) -> bool {
        match self.labels.as_slice() {
            [only] => *only == env.subdomain,
            labels => labels.iter().any(|label| *label == env.subdomain),
        }
    }
}

/// Matches the request method.
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    method: Method,
}

impl MethodMatcher {
    pub fn new(method: Method) -> Self {
        Self { method }
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, env: &RequestEnvironment) -> bool {
        env.method == self.method || (env.method == Method::HEAD && self.method == Method::GET)
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug, Default)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, env: &RequestEnvironment) -> bool {
        // All matchers must pass (AND)
        self.matchers.iter().all(|m| m.matches(env))
    }
}
