//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate route declarations (subdomain labels, names, methods)
//! - Validate value ranges (timeouts > 0, parsable bind address)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::Method;
use thiserror::Error;

use crate::config::schema::{AppConfig, EndpointConfig, RouteDeclaration};

/// A single semantic problem, located by its field path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "server.bind_address",
            format!("invalid socket address {:?}", config.server.bind_address),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "server.request_timeout_secs",
            "must be greater than zero",
        ));
    }

    validate_routes(&config.routes, "routes", &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routes(routes: &[RouteDeclaration], path: &str, errors: &mut Vec<ValidationError>) {
    for (index, route) in routes.iter().enumerate() {
        let field = format!("{}[{}]", path, index);
        validate_route(route, &field, errors);
        validate_routes(route.children(), &format!("{}.routes", field), errors);
    }
}

fn validate_route(route: &RouteDeclaration, field: &str, errors: &mut Vec<ValidationError>) {
    match route {
        RouteDeclaration::Connect { endpoint, .. } | RouteDeclaration::Root { endpoint } => {
            validate_endpoint(endpoint, field, errors);
        }
        RouteDeclaration::Named { name, endpoint, .. } => {
            require_name(name, field, errors);
            validate_endpoint(endpoint, field, errors);
        }
        RouteDeclaration::Namespace { name, .. } => require_name(name, field, errors),
        RouteDeclaration::Resources { name, has_many, .. }
        | RouteDeclaration::Resource { name, has_many, .. } => {
            require_name(name, field, errors);
            for (index, child) in has_many.iter().enumerate() {
                require_name(child, &format!("{}.has_many[{}]", field, index), errors);
            }
        }
        RouteDeclaration::Subdomain { subdomains, .. } => {
            if subdomains.is_empty() {
                errors.push(ValidationError::new(
                    format!("{}.subdomains", field),
                    "at least one subdomain must be specified",
                ));
            }
            for (index, label) in subdomains.iter().enumerate() {
                let label_field = format!("{}.subdomains[{}]", field, index);
                if label.is_empty() {
                    errors.push(ValidationError::new(label_field, "subdomain must not be empty"));
                } else if label.contains('.') {
                    errors.push(ValidationError::new(
                        label_field,
                        format!("subdomain {:?} must be a single label", label),
                    ));
                }
            }
        }
    }
}

fn validate_endpoint(endpoint: &EndpointConfig, field: &str, errors: &mut Vec<ValidationError>) {
    if let Some(method) = &endpoint.method {
        if Method::from_bytes(method.to_uppercase().as_bytes()).is_err() {
            errors.push(ValidationError::new(
                format!("{}.method", field),
                format!("invalid HTTP method {:?}", method),
            ));
        }
    }
}

fn require_name(name: &str, field: &str, errors: &mut Vec<ValidationError>) {
    if name.trim().is_empty() {
        errors.push(ValidationError::new(field, "name must not be empty"));
    }
}
