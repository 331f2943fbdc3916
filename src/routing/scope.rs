//! Declaration scopes.
//!
//! # Responsibilities
//! - Hold the options every rule of a declaration block inherits
//! - Derive child scopes for subdomain, namespace and resource blocks
//!
//! # Design Decisions
//! - A child scope starts as a copy of its parent and overrides fields
//! - A subdomain block replaces the parent's subdomain set, namespace and
//!   name prefix; it never unions them
//! - Options the caller set explicitly win over derived naming

use crate::routing::pattern::join_paths;
use crate::routing::subdomain::{GroupName, Naming, SubdomainSet};

/// Options shared by every rule declared in a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeOptions {
    pub(crate) namespace: Option<String>,
    pub(crate) name_prefix: Option<String>,
    pub(crate) path_prefix: Option<String>,
    pub(crate) subdomains: Option<SubdomainSet>,
}

impl ScopeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }

    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    /// Subdomain labels rules in this scope are constrained to.
    pub fn subdomains(&self) -> Option<&[String]> {
        self.subdomains.as_ref().map(SubdomainSet::labels)
    }

    pub fn subdomain_set(&self) -> Option<&SubdomainSet> {
        self.subdomains.as_ref()
    }

    /// Controller namespace, e.g. `admin/`.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Named-route prefix, e.g. `admin_`.
    pub fn name_prefix(&self) -> Option<&str> {
        self.name_prefix.as_deref()
    }

    pub fn path_prefix(&self) -> Option<&str> {
        self.path_prefix.as_deref()
    }

    /// Scope for a `subdomain` block.
    pub(crate) fn for_subdomains(&self, set: SubdomainSet, options: &SubdomainOptions) -> Self {
        let naming = Naming::derive(&set, &options.name);
        Self {
            namespace: options.scope.namespace.clone().or(naming.namespace),
            name_prefix: options.scope.name_prefix.clone().or(naming.name_prefix),
            path_prefix: options
                .scope
                .path_prefix
                .clone()
                .or_else(|| self.path_prefix.clone()),
            subdomains: Some(set),
        }
    }

    /// Scope for a `namespace` block: prefixes are appended to the parent's.
    pub(crate) fn for_namespace(&self, name: &str) -> Self {
        Self {
            namespace: Some(format!("{}{}/", self.namespace().unwrap_or(""), name)),
            name_prefix: Some(format!("{}{}_", self.name_prefix().unwrap_or(""), name)),
            path_prefix: Some(join_paths(self.path_prefix(), name)),
            subdomains: self.subdomains.clone(),
        }
    }

    /// Scope for routes nested under a resource member, e.g.
    /// `/articles/:article_id` with name prefix `article_`.
    pub(crate) fn for_member(&self, path_prefix: String, singular: &str) -> Self {
        Self {
            namespace: self.namespace.clone(),
            name_prefix: Some(format!("{}{}_", self.name_prefix().unwrap_or(""), singular)),
            path_prefix: Some(path_prefix),
            subdomains: self.subdomains.clone(),
        }
    }

    pub(crate) fn prefixed_name(&self, name: &str) -> String {
        format!("{}{}", self.name_prefix().unwrap_or(""), name)
    }

    pub(crate) fn namespaced_controller(&self, controller: &str) -> String {
        format!("{}{}", self.namespace().unwrap_or(""), controller)
    }
}

/// Options accepted by a `subdomain` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubdomainOptions {
    /// Naming override for the group.
    pub name: GroupName,
    /// Route options passed through to the block unchanged.
    pub scope: ScopeOptions,
}

impl SubdomainOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the group explicitly instead of after the primary subdomain.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: GroupName::named(name),
            ..Self::default()
        }
    }

    /// No namespace and no named-route prefix.
    pub fn unnamed() -> Self {
        Self {
            name: GroupName::Suppressed,
            ..Self::default()
        }
    }

    pub fn with_scope(mut self, scope: ScopeOptions) -> Self {
        self.scope = scope;
        self
    }
}
