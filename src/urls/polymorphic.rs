//! Record-driven URL generation.
//!
//! Route names are derived from the target chain: namespaces and records join
//! with `_`, the last record picks the member route when it has a param and
//! the collection route otherwise. `[Namespace("admin"), Record(user)]`
//! becomes `admin_user` with `id = user.to_param()`.

use crate::error::{Result, RoutingError};
use crate::routing::pattern::Params;
use crate::routing::resources::pluralize;
use crate::urls::writer::{UrlOptions, UrlWriter};

/// A value that maps onto a resource route.
pub trait RouteKey {
    /// Singular route name part, e.g. `user`.
    fn singular_route_key(&self) -> String;

    /// Plural route name part, e.g. `users`.
    fn route_key(&self) -> String {
        pluralize(&self.singular_route_key())
    }

    /// Member id; `None` for records that are not persisted yet.
    fn to_param(&self) -> Option<String>;
}

/// One element of a polymorphic target chain.
#[derive(Clone, Copy)]
pub enum PolymorphicTarget<'a> {
    Namespace(&'a str),
    Record(&'a dyn RouteKey),
}

impl std::fmt::Debug for PolymorphicTarget<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Namespace(name) => f.debug_tuple("Namespace").field(name).finish(),
            Self::Record(record) => f
                .debug_tuple("Record")
                .field(&record.singular_route_key())
                .field(&record.to_param())
                .finish(),
        }
    }
}

impl UrlWriter {
    pub fn polymorphic_url(&self, targets: &[PolymorphicTarget<'_>]) -> Result<String> {
        let (name, params) = polymorphic_route(targets)?;
        self.url_for_with(&name, &params, &UrlOptions::url())
    }

    pub fn polymorphic_path(&self, targets: &[PolymorphicTarget<'_>]) -> Result<String> {
        let (name, params) = polymorphic_route(targets)?;
        self.url_for_with(&name, &params, &UrlOptions::path())
    }
}

/// Route name and parameters for a target chain.
pub fn polymorphic_route(targets: &[PolymorphicTarget<'_>]) -> Result<(String, Params)> {
    let last_record = targets
        .iter()
        .rposition(|target| matches!(target, PolymorphicTarget::Record(_)));

    let mut parts = Vec::with_capacity(targets.len());
    let mut params = Params::new();
    for (index, target) in targets.iter().enumerate() {
        match target {
            PolymorphicTarget::Namespace(name) => parts.push(name.to_string()),
            PolymorphicTarget::Record(record) => {
                let singular = record.singular_route_key();
                if Some(index) == last_record {
                    match record.to_param() {
                        Some(id) => {
                            params.insert("id".to_string(), id);
                            parts.push(singular);
                        }
                        None => parts.push(record.route_key()),
                    }
                } else {
                    let id = record.to_param().ok_or_else(|| RoutingError::MissingParameter {
                        route: parts.join("_"),
                        param: format!("{}_id", singular),
                    })?;
                    params.insert(format!("{}_id", singular), id);
                    parts.push(singular);
                }
            }
        }
    }

    if last_record.is_none() {
        return Err(RoutingError::UnknownRoute(parts.join("_")));
    }
    Ok((parts.join("_"), params))
}
