//! Database driver abstraction.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::BackendError;

/// A database driver.
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    /// Returns a human-readable name for this backend.
    fn name(&self) -> &'static str;

    /// Checks if the backend is healthy and accepting connections.
    async fn health_check(&self) -> Result<(), BackendError>;

    /// Creates the schema if needed. Idempotent.
    async fn initialize(&self) -> Result<(), BackendError>;
}
