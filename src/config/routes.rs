//! Route declarations from configuration.
//!
//! Declarations are replayed through the public builder API, so configured
//! routes behave exactly like routes declared in code.

use axum::http::Method;

use crate::config::schema::{AppConfig, EndpointConfig, RouteDeclaration};
use crate::error::{Result, RoutingError};
use crate::routing::mapper::RouteGroupBuilder;
use crate::routing::resources::ResourceOptions;
use crate::routing::route::Endpoint;
use crate::routing::router::RouteSet;
use crate::routing::scope::{ScopeOptions, SubdomainOptions};
use crate::routing::table::RouteTable;

/// Declare `routes` on `map`, in order.
pub fn declare_routes(map: &mut RouteGroupBuilder<'_>, routes: &[RouteDeclaration]) -> Result<()> {
    for route in routes {
        declare_route(map, route)?;
    }
    Ok(())
}

fn declare_route(map: &mut RouteGroupBuilder<'_>, route: &RouteDeclaration) -> Result<()> {
    match route {
        RouteDeclaration::Connect { path, endpoint } => {
            map.connect(path, endpoint_from_config(endpoint)?)?;
        }
        RouteDeclaration::Named { name, path, endpoint } => {
            map.named_route(name, path, endpoint_from_config(endpoint)?)?;
        }
        RouteDeclaration::Root { endpoint } => {
            map.root(endpoint_from_config(endpoint)?)?;
        }
        RouteDeclaration::Namespace { name, routes } => {
            map.namespace(name, |scope| declare_routes(scope, routes))?;
        }
        RouteDeclaration::Resources {
            name,
            singular,
            controller,
            has_many,
            routes,
        } => {
            let options = ResourceOptions {
                singular: singular.clone(),
                controller: controller.clone(),
                has_many: has_many.clone(),
            };
            map.resources_with(name, options, |member| declare_routes(member, routes))?;
        }
        RouteDeclaration::Resource {
            name,
            controller,
            has_many,
            routes,
        } => {
            let options = ResourceOptions {
                singular: None,
                controller: controller.clone(),
                has_many: has_many.clone(),
            };
            map.resource_with(name, options, |nested| declare_routes(nested, routes))?;
        }
        RouteDeclaration::Subdomain {
            subdomains,
            name,
            namespace,
            name_prefix,
            path_prefix,
            routes,
        } => {
            let options = SubdomainOptions {
                name: name.group_name(),
                scope: ScopeOptions {
                    namespace: namespace.clone(),
                    name_prefix: name_prefix.clone(),
                    path_prefix: path_prefix.clone(),
                    subdomains: None,
                },
            };
            map.subdomain(subdomains.iter().cloned(), options, |scope| {
                declare_routes(scope, routes)
            })?;
        }
    }
    Ok(())
}

fn endpoint_from_config(config: &EndpointConfig) -> Result<Endpoint> {
    let mut endpoint = Endpoint::new();
    endpoint.controller = config.controller.clone();
    endpoint.action = config.action.clone();
    endpoint.defaults = config.defaults.clone();
    if let Some(method) = &config.method {
        let parsed = Method::from_bytes(method.to_uppercase().as_bytes())
            .map_err(|_| RoutingError::InvalidMethod(method.clone()))?;
        endpoint = endpoint.via(parsed);
    }
    Ok(endpoint)
}

impl RouteSet {
    /// Draw the routes declared in `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        RouteSet::draw(|map| declare_routes(map, &config.routes))
    }
}

impl RouteTable {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let routes = RouteSet::from_config(config)?;
        tracing::info!(routes = routes.len(), "Route table built");
        Ok(RouteTable::new(routes))
    }

    /// Replace the table with the routes declared in `config`.
    ///
    /// On error the current routes stay live.
    pub fn rebuild_from_config(&self, config: &AppConfig) -> Result<usize> {
        self.rebuild(|map| declare_routes(map, &config.routes))
    }
}
