// Service client module entry
// Capability handles for the identity provider and the document store

mod identity;
mod store;

pub use identity::{AuthError, AuthTokens, IdentityProvider, MemoryIdentity};
pub use store::{DocumentStore, MemoryStore, StoreError};
