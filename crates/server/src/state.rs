//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use storepoint_engine::InMemorySelectionStore;

use crate::config::StorepointConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorepointConfig,
    pool: PgPool,
    selections: Arc<InMemorySelectionStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: StorepointConfig, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                selections: Arc::new(InMemorySelectionStore::new()),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &StorepointConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a handle to the session-scoped selection store.
    #[must_use]
    pub fn selections(&self) -> Arc<InMemorySelectionStore> {
        Arc::clone(&self.inner.selections)
    }
}
