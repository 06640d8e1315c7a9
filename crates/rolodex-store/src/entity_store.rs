//! Type-safe entity storage with generic key types.
//!
//! `EntityStore<K, V>` layers typed CRUD with automatic JSON
//! serialization over a [`StorageBackend`]. Keys are types implementing
//! `StorageKey`, so a record id cannot be used against the user store.

use crate::storage_trait::{Partition, Result, StorageBackend, StorageError};
use rolodex_commons::StorageKey;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Trait for typed entity storage with type-safe keys.
///
/// Implementors provide `backend()` and `partition()`; CRUD methods
/// come for free with JSON serialization.
pub trait EntityStore<K, V>
where
    K: StorageKey,
    V: Serialize + DeserializeOwned + Send + Sync,
{
    /// Returns a reference to the storage backend.
    fn backend(&self) -> &Arc<dyn StorageBackend>;

    /// Returns the partition name for this entity type.
    fn partition(&self) -> &str;

    /// Serializes an entity to bytes. Default is JSON.
    fn serialize(&self, entity: &V) -> Result<Vec<u8>> {
        serde_json::to_vec(entity).map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    /// Deserializes bytes to an entity. Default is JSON.
    fn deserialize(&self, bytes: &[u8]) -> Result<V> {
        serde_json::from_slice(bytes).map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    /// Stores an entity with the given key.
    fn put(&self, key: &K, entity: &V) -> Result<()> {
        let partition = Partition::new(self.partition());
        let value = self.serialize(entity)?;
        self.backend().put(&partition, &key.storage_key(), &value)
    }

    /// Retrieves an entity by key. Returns `Ok(None)` if absent.
    fn get(&self, key: &K) -> Result<Option<V>> {
        let partition = Partition::new(self.partition());
        match self.backend().get(&partition, &key.storage_key())? {
            Some(bytes) => Ok(Some(self.deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Deletes an entity by key (idempotent).
    fn delete(&self, key: &K) -> Result<()> {
        let partition = Partition::new(self.partition());
        self.backend().delete(&partition, &key.storage_key())
    }

    /// Scans all entities in the partition.
    fn scan_all(&self) -> Result<Vec<(Vec<u8>, V)>> {
        let partition = Partition::new(self.partition());
        let mut results = Vec::new();
        for (key_bytes, value_bytes) in self.backend().scan(&partition, None)? {
            results.push((key_bytes, self.deserialize(&value_bytes)?));
        }
        Ok(results)
    }
}
