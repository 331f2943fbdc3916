//! Subdomain sets and the naming policy derived from them.
//!
//! # Responsibilities
//! - Hold the ordered, non-empty list of labels declared for a route group
//! - Derive the default namespace and named-route prefix
//! - Expose the recognition condition and generation requirement for rules
//!
//! # Design Decisions
//! - Labels are kept exactly as declared: no sorting, no de-duplication
//! - The first label is the primary subdomain
//! - Only single-label sets carry a generation requirement

use std::fmt;

use crate::error::{Result, RoutingError};

/// Ordered, non-empty list of subdomain labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdomainSet {
    labels: Vec<String>,
}

impl SubdomainSet {
    /// Build a set from the declared labels.
    ///
    /// Fails with [`RoutingError::NoSubdomains`] when `labels` is empty.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(RoutingError::NoSubdomains);
        }
        Ok(Self { labels })
    }

    /// All labels in declaration order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The first declared label.
    pub fn primary(&self) -> &str {
        &self.labels[0]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Never true for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns true if `subdomain` is one of the labels.
    pub fn contains(&self, subdomain: &str) -> bool {
        self.labels.iter().any(|label| label == subdomain)
    }

    /// The label URL generation must target, if any.
    ///
    /// Sets with several labels have no requirement: generation cannot tell
    /// which of them to pick.
    pub fn requirement(&self) -> Option<&str> {
        match self.labels.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for SubdomainSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels.join("|"))
    }
}

/// How a subdomain group names its routes and controllers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GroupName {
    /// Use the primary subdomain.
    #[default]
    Default,
    /// Use an explicit name instead of the primary subdomain.
    Named(String),
    /// No namespace and no named-route prefix at all.
    Suppressed,
}

impl GroupName {
    pub fn named(name: impl Into<String>) -> Self {
        GroupName::Named(name.into())
    }
}

/// Namespace and named-route prefix derived for a subdomain group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Naming {
    /// Controller namespace, e.g. `"admin/"`.
    pub namespace: Option<String>,
    /// Named-route prefix, e.g. `"admin_"`.
    pub name_prefix: Option<String>,
}

impl Naming {
    /// Apply the naming policy to a subdomain set.
    pub fn derive(subdomains: &SubdomainSet, name: &GroupName) -> Self {
        let base = match name {
            GroupName::Suppressed => return Self::default(),
            GroupName::Named(name) => name.as_str(),
            GroupName::Default => subdomains.primary(),
        };
        Self {
            namespace: Some(format!("{}/", base)),
            name_prefix: Some(format!("{}_", base)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_is_rejected() {
        let labels: Vec<String> = Vec::new();
        assert_eq!(SubdomainSet::new(labels), Err(RoutingError::NoSubdomains));
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let set = SubdomainSet::new(["support", "admin", "support"]).unwrap();
        assert_eq!(set.labels(), ["support", "admin", "support"]);
        assert_eq!(set.primary(), "support");
    }

    #[test]
    fn test_requirement_only_for_single_label() {
        let single = SubdomainSet::new(["admin"]).unwrap();
        assert_eq!(single.requirement(), Some("admin"));

        let many = SubdomainSet::new(["books", "dvds"]).unwrap();
        assert_eq!(many.requirement(), None);
    }

    #[test]
    fn test_naming_policy() {
        let set = SubdomainSet::new(["support", "admin"]).unwrap();

        let naming = Naming::derive(&set, &GroupName::Default);
        assert_eq!(naming.namespace.as_deref(), Some("support/"));
        assert_eq!(naming.name_prefix.as_deref(), Some("support_"));

        let naming = Naming::derive(&set, &GroupName::named("something"));
        assert_eq!(naming.namespace.as_deref(), Some("something/"));
        assert_eq!(naming.name_prefix.as_deref(), Some("something_"));

        assert_eq!(Naming::derive(&set, &GroupName::Suppressed), Naming::default());
    }
}
