// Application state module
// Configuration plus the process-lifetime service client handles

use std::sync::Arc;

use super::types::Config;
use crate::clients::{DocumentStore, IdentityProvider, MemoryIdentity, MemoryStore};

/// Application state
///
/// Built once at startup and shared across connections. The collaborator
/// handles are trait objects so tests can inject stubs.
pub struct AppState {
    pub config: Config,
    pub identity: Arc<dyn IdentityProvider>,
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Create `AppState` with the in-process collaborator implementations
    pub fn new(config: Config) -> Self {
        let identity = Arc::new(MemoryIdentity::new(&config.auth));
        Self::with_clients(config, identity, Arc::new(MemoryStore::new()))
    }

    /// Create `AppState` with explicit collaborator handles
    pub fn with_clients(
        config: Config,
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            config,
            identity,
            store,
        }
    }
}
