//! Identity provider client
//!
//! Boundary to the managed user-pool service. Handlers consume the trait;
//! the concrete provider is picked at process start and injected through
//! `AppState`, so tests can substitute stubs.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::AuthConfig;

/// Identity provider operation error.
///
/// The first three variants are the named faults the handlers map to fixed
/// 400 responses; `Service` covers everything else (outage, misconfiguration).
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authorized")]
    NotAuthorized,

    #[error("user not found")]
    UserNotFound,

    #[error("user already exists")]
    UserExists,

    #[error("identity service error: {0}")]
    Service(String),
}

/// Token triple issued on successful authentication.
///
/// Fields the provider did not return stay `None` and are omitted from the
/// serialized JSON rather than rendered as null.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

/// User-pool operations consumed by the signup/signin handlers.
///
/// The pool id and client id are constructor inputs to the concrete
/// provider, not per-call arguments.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new user with a permanent password.
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Password authentication. Returns the token triple on success.
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthTokens, AuthError>;
}

/// Process-local user pool.
///
/// Stand-in for the managed identity service: same fault taxonomy, tokens
/// namespaced by the configured pool and client ids.
pub struct MemoryIdentity {
    pool_id: String,
    client_id: String,
    users: RwLock<HashMap<String, String>>,
}

impl MemoryIdentity {
    pub fn new(auth: &AuthConfig) -> Self {
        Self {
            pool_id: auth.user_pool_id.clone(),
            client_id: auth.client_id.clone(),
            users: RwLock::new(HashMap::new()),
        }
    }

    fn issue_tokens(&self) -> AuthTokens {
        AuthTokens {
            access_token: Some(format!(
                "{}.{}.{}",
                self.pool_id,
                self.client_id,
                Uuid::new_v4()
            )),
            refresh_token: Some(Uuid::new_v4().to_string()),
            expires_in: Some(3600),
        }
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(AuthError::UserExists);
        }
        users.insert(email.to_string(), password.to_string());
        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthTokens, AuthError> {
        let users = self.users.read().await;
        match users.get(email) {
            None => Err(AuthError::UserNotFound),
            Some(stored) if stored != password => Err(AuthError::NotAuthorized),
            Some(_) => Ok(self.issue_tokens()),
        }
    }
}
