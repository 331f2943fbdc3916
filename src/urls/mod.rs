//! URL generation.
//!
//! # Data Flow
//! ```text
//! url_for / path_for / polymorphic_*(name or targets, params)
//!     → router.rs (named route lookup)
//!     → pattern.rs (fill path segments, leftover params → query)
//!     → host.rs (subdomain requirement vs effective host)
//!     → Return: path, or absolute URL when asked for or forced
//! ```
//!
//! # Design Decisions
//! - Only single-label subdomain scopes carry a requirement; routes shared by
//!   several subdomains are generated host-unaware
//! - A path for a route on another subdomain is upgraded to an absolute URL

pub mod host;
pub mod polymorphic;
pub mod writer;

pub use host::{HostDecision, HostResolver};
pub use polymorphic::{PolymorphicTarget, RouteKey};
pub use writer::{UrlContext, UrlOptions, UrlWriter};
