//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the recognition handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - Recognize every request against the live route table
//! - Apply configuration reloads while serving

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::any,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::request::{request_id, MakeRequestUuid};
use crate::http::response::{ApiError, RecognizedRoute};
use crate::routing::environment::RequestEnvironment;
use crate::routing::table::RouteTable;
use crate::urls::writer::UrlWriter;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
}

/// HTTP front end of the route table.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    table: Arc<RouteTable>,
}

impl HttpServer {
    /// Create a new HTTP server serving `table`.
    pub fn new(config: AppConfig, table: Arc<RouteTable>) -> Self {
        let state = AppState {
            routes: table.clone(),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            table,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(recognize_handler))
            .route("/{*path}", any(recognize_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id(request.headers()).unwrap_or("unknown"),
                        )
                    }))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.server.request_timeout_secs,
                    ))),
            )
    }

    /// The Axum router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Every configuration received on `config_updates` rebuilds the route
    /// table; a rejected configuration leaves the current routes live.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<AppConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.table.load().len(),
            "HTTP server starting"
        );

        let table = self.table.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                // The table logs the outcome.
                let _ = table.rebuild_from_config(&config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Recognize the request and describe the matched route.
async fn recognize_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> impl IntoResponse {
    let request_id = request_id(request.headers()).unwrap_or("unknown").to_string();

    let env = match RequestEnvironment::from_request(&request) {
        Ok(env) => env,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Unroutable request");
            return ApiError::new(e, None).into_response();
        }
    };

    let routes = state.routes.load();
    match routes.recognize(&env) {
        Ok(matched) => {
            let url = matched.rule.name().and_then(|name| {
                UrlWriter::for_request(routes.clone(), &env)
                    .url_for(name, &matched.params)
                    .ok()
            });
            let body = RecognizedRoute::new(&matched, &env.subdomain, url);
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                method = %env.method,
                subdomain = %env.subdomain,
                path = %env.path,
                "No route matched"
            );
            ApiError::new(e, Some(env.subdomain)).into_response()
        }
    }
}
