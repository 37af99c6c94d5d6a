//! Document store client
//!
//! Boundary to the managed document database. Collections are named by the
//! configuration (`store.tables_table`, `store.reservations_table`);
//! documents are schemaless JSON values keyed by string.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tokio::sync::RwLock;

/// Document store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store error: {0}")]
    Service(String),
}

/// Read/write/scan operations consumed by the table and reservation handlers.
///
/// Atomicity beyond a single `put` is the store's concern, not the caller's.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in a collection, in stable key order.
    async fn scan(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    /// Single document by key, `None` if absent.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError>;

    /// Insert or replace a document under the given key.
    async fn put(&self, collection: &str, key: &str, document: Value) -> Result<(), StoreError>;
}

/// Process-local document store backed by nested maps.
///
/// `BTreeMap` keeps scan order stable across runs.
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn scan(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned())
    }

    async fn put(&self, collection: &str, key: &str, document: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), document);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryStore::new();
        store
            .put("Tables", "1", json!({"id": 1, "places": 4}))
            .await
            .unwrap();

        let doc = store.get("Tables", "1").await.unwrap().unwrap();
        assert_eq!(doc["places"], 4);
    }

    #[tokio::test]
    async fn test_get_absent() {
        let store = MemoryStore::new();
        assert!(store.get("Tables", "42").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scan_is_key_ordered() {
        let store = MemoryStore::new();
        store.put("Tables", "2", json!({"id": 2})).await.unwrap();
        store.put("Tables", "1", json!({"id": 1})).await.unwrap();

        let docs = store.scan("Tables").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["id"], 1);
        assert_eq!(docs[1]["id"], 2);
    }

    #[tokio::test]
    async fn test_scan_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        assert!(store.scan("Nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_put_replaces_existing() {
        let store = MemoryStore::new();
        store.put("Tables", "1", json!({"places": 2})).await.unwrap();
        store.put("Tables", "1", json!({"places": 6})).await.unwrap();

        let doc = store.get("Tables", "1").await.unwrap().unwrap();
        assert_eq!(doc["places"], 6);
    }
}
