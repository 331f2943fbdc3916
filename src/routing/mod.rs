//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Declaration (at startup / reload):
//!     RouteSet::draw(|map| ...)
//!     → mapper.rs (subdomain / namespace / resource blocks)
//!     → scope.rs (derive namespace, name prefix, subdomain set)
//!     → route.rs (attach conditions + requirements, compile matchers)
//!     → Freeze as immutable RouteSet, publish through RouteTable
//!
//! Incoming Request (method, host, path)
//!     → environment.rs (extract subdomain)
//!     → router.rs (scan rules in declaration order)
//!     → matcher.rs (method + subdomain conditions)
//!     → pattern.rs (path segments)
//!     → Return: RouteMatch or NoRouteMatches
//! ```
//!
//! # Design Decisions
//! - Routes compiled at draw time, immutable at runtime
//! - No regex in hot path (segment matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)
//! - A request on the wrong subdomain is indistinguishable from an unknown path

pub mod environment;
pub mod mapper;
pub mod matcher;
pub mod pattern;
pub mod resources;
pub mod route;
pub mod router;
pub mod scope;
pub mod subdomain;
pub mod table;

pub use environment::RequestEnvironment;
pub use mapper::RouteGroupBuilder;
pub use pattern::{Params, PathPattern};
pub use resources::ResourceOptions;
pub use route::{Conditions, Endpoint, Requirements, RouteRule};
pub use router::{RouteMatch, RouteSet};
pub use scope::{ScopeOptions, SubdomainOptions};
pub use subdomain::{GroupName, Naming, SubdomainSet};
pub use table::RouteTable;
