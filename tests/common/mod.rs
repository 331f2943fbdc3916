//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use subdomain_routes::config::{parse_config, AppConfig};
use subdomain_routes::routing::{Params, RouteGroupBuilder, RouteSet, RouteTable, SubdomainOptions};
use subdomain_routes::urls::{RouteKey, UrlContext, UrlWriter};
use subdomain_routes::{HttpServer, Result, Shutdown};

/// Label sets exercised by the table-driven tests.
pub const LABEL_SETS: &[&[&str]] = &[&["admin"], &["support", "admin"], &["books", "dvds", "cds"]];

/// Draw a route set with one subdomain block declaring `users` and `items`.
pub fn map_subdomain(labels: &[&str], options: SubdomainOptions) -> Result<RouteSet> {
    map_subdomain_with(labels, options, |scope| {
        scope.resources("users")?;
        scope.resources("items")?;
        Ok(())
    })
}

pub fn map_subdomain_with<F>(labels: &[&str], options: SubdomainOptions, f: F) -> Result<RouteSet>
where
    F: FnOnce(&mut RouteGroupBuilder<'_>) -> Result<()>,
{
    let labels: Vec<String> = labels.iter().map(|label| label.to_string()).collect();
    RouteSet::draw(|map| {
        map.subdomain(labels, options, f)?;
        Ok(())
    })
}

/// URL writer rendering for a request on `host`.
pub fn with_host(routes: RouteSet, host: &str) -> UrlWriter {
    UrlWriter::new(Arc::new(routes), Some(UrlContext::new("http", host)))
}

pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub fn param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str)
}

pub struct User {
    pub id: Option<u32>,
}

impl RouteKey for User {
    fn singular_route_key(&self) -> String {
        "user".into()
    }

    fn to_param(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

pub struct Item {
    pub id: Option<u32>,
}

impl RouteKey for Item {
    fn singular_route_key(&self) -> String {
        "item".into()
    }

    fn to_param(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

pub fn config(toml: &str) -> AppConfig {
    parse_config(toml).unwrap()
}

/// A running server on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub config_updates: mpsc::UnboundedSender<AppConfig>,
    pub table: Arc<RouteTable>,
}

/// Start the HTTP server for `config` on 127.0.0.1:0.
pub async fn start_server(config: AppConfig) -> TestServer {
    let table = Arc::new(RouteTable::from_config(&config).unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_updates, updates_rx) = mpsc::unbounded_channel();
    let server = HttpServer::new(config, table.clone());
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, updates_rx, server_shutdown).await;
    });

    TestServer {
        addr,
        shutdown,
        config_updates,
        table,
    }
}

/// Poll `check` until it holds or the deadline passes.
pub async fn wait_until<F>(mut check: F, timeout: Duration) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    check()
}
