//! Route declaration.
//!
//! # Responsibilities
//! - Provide the builder handle route declarations are made through
//! - Open subdomain and namespace blocks with derived scopes
//! - Turn declarations into rules tagged with the active scope
//!
//! # Design Decisions
//! - Blocks receive an explicit `&mut RouteGroupBuilder`; there is no ambient
//!   mapper and no global route table
//! - A failed declaration aborts the whole draw (fail fast)
//! - An empty subdomain list is rejected before the block runs

use crate::error::Result;
use crate::routing::pattern::{join_paths, PathPattern};
use crate::routing::route::{Endpoint, RouteRule};
use crate::routing::scope::{ScopeOptions, SubdomainOptions};
use crate::routing::subdomain::SubdomainSet;

/// Handle through which routes are declared.
#[derive(Debug)]
pub struct RouteGroupBuilder<'a> {
    rules: &'a mut Vec<RouteRule>,
    options: ScopeOptions,
}

impl<'a> RouteGroupBuilder<'a> {
    pub(crate) fn new(rules: &'a mut Vec<RouteRule>, options: ScopeOptions) -> Self {
        Self { rules, options }
    }

    /// Options every rule declared through this handle inherits.
    pub fn options(&self) -> &ScopeOptions {
        &self.options
    }

    /// Declare a block of routes restricted to the given subdomains.
    ///
    /// Rules declared in `f` only recognize requests whose host's first label
    /// is one of `labels`. With exactly one label, generated URLs for those
    /// rules also carry that subdomain.
    ///
    /// Fails with `NoSubdomains` when `labels` is empty.
    pub fn subdomain<I, S, F>(
        &mut self,
        labels: I,
        options: SubdomainOptions,
        f: F,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce(&mut RouteGroupBuilder<'_>) -> Result<()>,
    {
        let set = SubdomainSet::new(labels)?;
        let scope = self.options.for_subdomains(set, &options);
        tracing::debug!(
            subdomains = ?scope.subdomains(),
            namespace = ?scope.namespace(),
            name_prefix = ?scope.name_prefix(),
            "Entering subdomain scope"
        );
        self.scoped(scope, f)?;
        Ok(self)
    }

    /// Alias of [`subdomain`](Self::subdomain).
    pub fn subdomains<I, S, F>(
        &mut self,
        labels: I,
        options: SubdomainOptions,
        f: F,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce(&mut RouteGroupBuilder<'_>) -> Result<()>,
    {
        self.subdomain(labels, options, f)
    }

    /// Declare a block under `/<name>`, with `<name>_` route names and
    /// `<name>/` controllers.
    pub fn namespace<F>(&mut self, name: &str, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut RouteGroupBuilder<'_>) -> Result<()>,
    {
        let scope = self.options.for_namespace(name);
        self.scoped(scope, f)?;
        Ok(self)
    }

    /// Declare an unnamed route.
    pub fn connect(&mut self, path: &str, endpoint: Endpoint) -> Result<&mut Self> {
        self.add_rule(None, path, endpoint, true)?;
        Ok(self)
    }

    /// Declare a named route. The scope's name prefix is prepended.
    pub fn named_route(&mut self, name: &str, path: &str, endpoint: Endpoint) -> Result<&mut Self> {
        let name = self.options.prefixed_name(name);
        self.add_rule(Some(name), path, endpoint, true)?;
        Ok(self)
    }

    /// Declare the `root` route at the scope's path prefix.
    pub fn root(&mut self, endpoint: Endpoint) -> Result<&mut Self> {
        self.named_route("root", "/", endpoint)
    }

    pub(crate) fn scoped<F>(&mut self, options: ScopeOptions, f: F) -> Result<()>
    where
        F: FnOnce(&mut RouteGroupBuilder<'_>) -> Result<()>,
    {
        let mut child = RouteGroupBuilder {
            rules: &mut *self.rules,
            options,
        };
        f(&mut child)
    }

    /// Build a rule in this scope and append it to the table.
    ///
    /// `name` is final (prefix already applied). With `optional_id`, a
    /// trailing `:id` segment may be omitted from requests.
    pub(crate) fn add_rule(
        &mut self,
        name: Option<String>,
        path: &str,
        endpoint: Endpoint,
        optional_id: bool,
    ) -> Result<()> {
        let full_path = join_paths(self.options.path_prefix(), path);

        let mut defaults = endpoint.defaults;
        if let Some(controller) = &endpoint.controller {
            defaults.insert(
                "controller".to_string(),
                self.options.namespaced_controller(controller),
            );
        }
        match endpoint.action {
            Some(action) => {
                defaults.insert("action".to_string(), action);
            }
            None if full_path.contains(":action") => {
                defaults
                    .entry("action".to_string())
                    .or_insert_with(|| "index".to_string());
            }
            None => {}
        }

        let pattern = PathPattern::parse(&full_path, |segment| {
            defaults.contains_key(segment) || (optional_id && segment == "id")
        })?;

        let rule = RouteRule::new(
            name,
            pattern,
            defaults,
            endpoint.method,
            self.options.subdomain_set(),
        );
        tracing::debug!(
            name = ?rule.name(),
            path = %rule.pattern(),
            subdomains = ?rule.conditions().subdomains,
            "Declared route"
        );
        self.rules.push(rule);
        Ok(())
    }
}
