//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → request.rs (derive RequestEnvironment from host + path)
//!     → routing (recognize against the live RouteTable snapshot)
//!     → response.rs (JSON description or 404)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::{ApiError, ErrorBody, RecognizedRoute};
pub use server::{AppState, HttpServer};
