//! Route configuration hot reload.
//!
//! # Responsibilities
//! - Watch the directory holding the route file for changes to that file
//! - Load and validate the edited file
//! - Hand each new, valid configuration to the server over a channel
//!
//! # Design Decisions
//! - The parent directory is watched, not the file: editors that save by
//!   renaming a temp file over the original replace the watched inode
//! - Events for other files in the directory are ignored
//! - An edit that fails to load is logged and dropped; the live routes stay
//! - A configuration equal to the last one delivered is not sent again, so
//!   the burst of events from a single save yields one update
//!
//! # Data Flow
//! ```text
//! notify event (watcher thread)
//!     → filter by file name
//!     → load_config (parse + validate)
//!     → compare with last delivered
//!     → mpsc channel → server reloader → RouteTable::rebuild_from_config
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::AppConfig;

/// Watches one route configuration file.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<AppConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and a receiver for validated configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<AppConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching on notify's background thread.
    ///
    /// The returned watcher must be kept alive for as long as updates are
    /// wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let file_name = self
            .path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| notify::Error::generic("config path has no file name"))?;
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let tx = self.update_tx;
        let path = self.path.clone();
        let mut last = load_config(&path).ok();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create()) {
                        return;
                    }
                    if !touches(&event, &file_name) {
                        return;
                    }
                    match load_config(&path) {
                        Ok(config) if last.as_ref() == Some(&config) => {
                            tracing::debug!(path = ?path, "Config unchanged, skipping reload");
                        }
                        Ok(config) => {
                            tracing::info!(path = ?path, routes = config.routes.len(), "Config file changed, reloading");
                            last = Some(config.clone());
                            let _ = tx.send(config);
                        }
                        Err(e) => {
                            tracing::warn!(path = ?path, error = %e, "Failed to reload config, keeping current routes");
                        }
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&directory, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, directory = ?directory, "Config watcher started");
        Ok(watcher)
    }
}

fn touches(event: &Event, file_name: &OsString) -> bool {
    event
        .paths
        .iter()
        .any(|path| path.file_name() == Some(file_name.as_os_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;
    use std::fs;

    const INITIAL: &str = r#"
        [[routes]]
        type = "resources"
        name = "items"
    "#;

    const EDITED: &str = r#"
        [[routes]]
        type = "resources"
        name = "items"

        [[routes]]
        type = "subdomain"
        subdomains = ["admin"]

          [[routes.routes]]
          type = "resources"
          name = "users"
    "#;

    const BROKEN: &str = r#"
        [[routes]]
        type = "subdomain"
        subdomains = []
    "#;

    /// Save the way editors do: write a sibling temp file, rename it over.
    fn save(path: &Path, content: &str) {
        let temp = path.with_extension("toml.swp");
        fs::write(&temp, content).unwrap();
        fs::rename(&temp, path).unwrap();
    }

    #[test]
    fn test_event_filter_by_file_name() {
        let name = OsString::from("routes.toml");
        let event = Event::new(EventKind::Any).add_path(PathBuf::from("/etc/app/routes.toml"));
        assert!(touches(&event, &name));

        let other = Event::new(EventKind::Any).add_path(PathBuf::from("/etc/app/routes.toml.swp"));
        assert!(!touches(&other, &name));
    }

    #[tokio::test]
    async fn test_reload_survives_atomic_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.toml");
        fs::write(&path, INITIAL).unwrap();

        let (watcher, mut updates) = ConfigWatcher::new(&path);
        let _watcher = watcher.run().unwrap();

        save(&path, EDITED);
        let config = tokio::time::timeout(Duration::from_secs(5), updates.recv())
            .await
            .expect("no update for a valid edit")
            .unwrap();
        assert_eq!(config.routes.len(), 2);

        save(&path, BROKEN);
        let extra = tokio::time::timeout(Duration::from_millis(750), updates.recv()).await;
        assert!(extra.is_err(), "unexpected update: {:?}", extra);

        // The watch outlives the replaced file.
        save(&path, INITIAL);
        let config = tokio::time::timeout(Duration::from_secs(5), updates.recv())
            .await
            .expect("no update after the file was replaced")
            .unwrap();
        assert_eq!(config.routes.len(), 1);
    }
}
