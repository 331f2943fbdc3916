//! Subdomain-aware route mapping.
//!
//! Routes declared inside a `subdomain` block only recognize requests whose
//! host starts with one of the block's labels, and URLs generated for them
//! point at that subdomain.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod urls;

pub use config::schema::AppConfig;
pub use error::{Result, RoutingError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{RouteGroupBuilder, RouteSet, RouteTable, SubdomainOptions};
pub use urls::UrlWriter;
