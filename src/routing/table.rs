//! Shared, reloadable route table.
//!
//! # Responsibilities
//! - Publish the live `RouteSet` snapshot to request handlers
//! - Rebuild the snapshot on reload
//!
//! # Design Decisions
//! - Readers get an `Arc<RouteSet>` without locking (`ArcSwap`)
//! - Rebuilds are serialized by a single mutex and swap in a complete set
//! - A failed rebuild keeps the current snapshot live

use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;

use crate::error::Result;
use crate::routing::mapper::RouteGroupBuilder;
use crate::routing::router::RouteSet;

/// Route table shared between the server and reloaders.
#[derive(Debug)]
pub struct RouteTable {
    current: ArcSwap<RouteSet>,
    rebuild_lock: Mutex<()>,
}

impl RouteTable {
    pub fn new(routes: RouteSet) -> Self {
        Self {
            current: ArcSwap::from_pointee(routes),
            rebuild_lock: Mutex::new(()),
        }
    }

    /// Snapshot of the current route set.
    ///
    /// The snapshot stays valid (and unchanged) for as long as it is held,
    /// even if the table is rebuilt meanwhile.
    pub fn load(&self) -> Arc<RouteSet> {
        self.current.load_full()
    }

    /// Redraw the table. Returns the number of rules on success.
    pub fn rebuild<F>(&self, f: F) -> Result<usize>
    where
        F: FnOnce(&mut RouteGroupBuilder<'_>) -> Result<()>,
    {
        let _guard = self
            .rebuild_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match RouteSet::draw(f) {
            Ok(routes) => {
                let count = routes.len();
                self.current.store(Arc::new(routes));
                tracing::info!(routes = count, "Route table rebuilt");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Route table rebuild failed, keeping current routes");
                Err(e)
            }
        }
    }

    /// Drop every route.
    pub fn clear(&self) {
        let _guard = self
            .rebuild_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.current.store(Arc::new(RouteSet::empty()));
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(RouteSet::empty())
    }
}
