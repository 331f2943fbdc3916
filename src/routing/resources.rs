//! Resource route expansion.
//!
//! # Responsibilities
//! - Expand `resources` into the seven CRUD routes
//! - Expand `resource` into the six singleton routes
//! - Open member scopes for nested resources
//!
//! # Design Decisions
//! - Expanded rules are declared through the same builder as hand-written
//!   ones, so they inherit the enclosing subdomain scope
//! - `/items/new` is declared before `/items/:id` so it is recognized first
//! - Inflection covers regular English nouns; anything else uses `singular`

use axum::http::Method;

use crate::error::Result;
use crate::routing::mapper::RouteGroupBuilder;
use crate::routing::pattern::join_paths;
use crate::routing::route::Endpoint;

/// Options for `resources`/`resource` declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceOptions {
    /// Singular form used in member route names (`item` for `items`).
    pub singular: Option<String>,
    /// Controller name, before namespacing.
    pub controller: Option<String>,
    /// Plural resources nested under each member.
    pub has_many: Vec<String>,
}

impl ResourceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singular(mut self, singular: impl Into<String>) -> Self {
        self.singular = Some(singular.into());
        self
    }

    pub fn controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    pub fn has_many<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.has_many.extend(names.into_iter().map(Into::into));
        self
    }
}

impl RouteGroupBuilder<'_> {
    /// Declare the CRUD routes of a plural resource.
    pub fn resources(&mut self, name: &str) -> Result<&mut Self> {
        self.resources_with(name, ResourceOptions::default(), |_| Ok(()))
    }

    /// Declare a plural resource; `f` receives the member scope
    /// (`/items/:item_id`, `item_` names) for nested declarations.
    pub fn resources_with<F>(&mut self, name: &str, options: ResourceOptions, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut RouteGroupBuilder<'_>) -> Result<()>,
    {
        let singular = options.singular.clone().unwrap_or_else(|| singularize(name));
        let controller = options.controller.clone().unwrap_or_else(|| name.to_string());
        let collection = format!("/{}", name);
        let member = format!("{}/:id", collection);
        let endpoint = |action: &str, method: Method| Endpoint::to(controller.as_str(), action).via(method);

        let plural_name = self.options().prefixed_name(name);
        let member_name = self.options().prefixed_name(&singular);

        self.add_rule(Some(plural_name), &collection, endpoint("index", Method::GET), false)?;
        self.add_rule(None, &collection, endpoint("create", Method::POST), false)?;
        self.add_rule(
            Some(format!("new_{}", member_name)),
            &format!("{}/new", collection),
            endpoint("new", Method::GET),
            false,
        )?;
        self.add_rule(
            Some(format!("edit_{}", member_name)),
            &format!("{}/edit", member),
            endpoint("edit", Method::GET),
            false,
        )?;
        self.add_rule(Some(member_name), &member, endpoint("show", Method::GET), false)?;
        self.add_rule(None, &member, endpoint("update", Method::PUT), false)?;
        self.add_rule(None, &member, endpoint("destroy", Method::DELETE), false)?;

        let nested_prefix = join_paths(
            self.options().path_prefix(),
            &format!("{}/:{}_id", collection, singular),
        );
        let scope = self.options().for_member(nested_prefix, &singular);
        self.scoped(scope, |member| {
            for child in &options.has_many {
                member.resources(child)?;
            }
            f(member)
        })?;
        Ok(self)
    }

    /// Declare the routes of a singleton resource.
    pub fn resource(&mut self, name: &str) -> Result<&mut Self> {
        self.resource_with(name, ResourceOptions::default(), |_| Ok(()))
    }

    /// Declare a singleton resource; `f` receives the nested scope
    /// (`/config`, `config_` names).
    pub fn resource_with<F>(&mut self, name: &str, options: ResourceOptions, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut RouteGroupBuilder<'_>) -> Result<()>,
    {
        let controller = options.controller.clone().unwrap_or_else(|| pluralize(name));
        let path = format!("/{}", name);
        let endpoint = |action: &str, method: Method| Endpoint::to(controller.as_str(), action).via(method);

        let route_name = self.options().prefixed_name(name);

        self.add_rule(None, &path, endpoint("create", Method::POST), false)?;
        self.add_rule(
            Some(format!("new_{}", route_name)),
            &format!("{}/new", path),
            endpoint("new", Method::GET),
            false,
        )?;
        self.add_rule(
            Some(format!("edit_{}", route_name)),
            &format!("{}/edit", path),
            endpoint("edit", Method::GET),
            false,
        )?;
        self.add_rule(Some(route_name), &path, endpoint("show", Method::GET), false)?;
        self.add_rule(None, &path, endpoint("update", Method::PUT), false)?;
        self.add_rule(None, &path, endpoint("destroy", Method::DELETE), false)?;

        let nested_prefix = join_paths(self.options().path_prefix(), &path);
        let scope = self.options().for_member(nested_prefix, name);
        self.scoped(scope, |nested| {
            for child in &options.has_many {
                nested.resources(child)?;
            }
            f(nested)
        })?;
        Ok(self)
    }
}

/// Singular form of a regular English plural.
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        format!("{}y", stem)
    } else if ["sses", "shes", "ches", "xes"].iter().any(|suffix| word.ends_with(suffix)) {
        word[..word.len() - 2].to_string()
    } else if let Some(stem) = word.strip_suffix('s') {
        stem.to_string()
    } else {
        word.to_string()
    }
}

/// Plural form of a regular English noun.
pub fn pluralize(word: &str) -> String {
    let consonant_y = word.ends_with('y')
        && !word
            .chars()
            .rev()
            .nth(1)
            .is_some_and(|c| "aeiou".contains(c));
    if consonant_y {
        format!("{}ies", &word[..word.len() - 1])
    } else if ["s", "x", "ch", "sh"].iter().any(|suffix| word.ends_with(suffix)) {
        format!("{}es", word)
    } else {
        format!("{}s", word)
    }
}
