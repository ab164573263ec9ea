//! Application state shared by every handler.

use std::sync::Arc;

use roomkeeper_persistence::service::{CrudService, QueryService};

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type
///
/// # Example
///
/// ```rust,no_run
/// # #[cfg(feature = "sqlite")]
/// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// use std::sync::Arc;
///
/// use roomkeeper_persistence::backends::sqlite::SqliteBackend;
/// use roomkeeper_rest::{AppState, ServerConfig};
///
/// let backend = SqliteBackend::in_memory()?;
/// let state = AppState::new(Arc::new(backend), ServerConfig::default());
/// assert_eq!(state.base_url(), "http://localhost:8080");
/// # Ok(())
/// # }
/// ```
pub struct AppState<S> {
    storage: Arc<S>,
    config: Arc<ServerConfig>,
}

// S sits behind an Arc and need not be Clone.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S> AppState<S> {
    /// Creates a new AppState with the given storage and configuration.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a CRUD service over the shared storage.
    pub fn crud(&self) -> CrudService<S> {
        CrudService::new(Arc::clone(&self.storage))
    }

    /// Returns a query service over the shared storage.
    pub fn queries(&self) -> QueryService<S> {
        QueryService::new(Arc::clone(&self.storage))
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the base URL for the server.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the page size used when only `page` is given.
    pub fn default_page_size(&self) -> u32 {
        self.config.default_page_size
    }

    /// Returns the maximum page size.
    pub fn max_page_size(&self) -> u32 {
        self.config.max_page_size
    }
}
