//! Unique secondary index: index key → primary key.
//!
//! The registry keeps one of these per uniqueness constraint
//! (customer name, email). Only non-deleted records occupy index
//! entries; the registry removes entries on soft delete, which is what
//! makes the constraints soft-delete aware.

use crate::storage_trait::{Partition, Result, StorageBackend, StorageError};
use std::sync::Arc;

/// A unique one-to-one mapping from an index key to a primary key.
pub struct UniqueIndex {
    backend: Arc<dyn StorageBackend>,
    partition: Partition,
}

impl UniqueIndex {
    /// Creates the index, creating its partition if needed.
    pub fn new(backend: Arc<dyn StorageBackend>, partition_name: &str) -> Result<Self> {
        let partition = Partition::new(partition_name);
        backend.create_partition(&partition)?;
        Ok(Self { backend, partition })
    }

    /// Returns the primary key currently mapped to `key`, if any.
    pub fn get(&self, key: &[u8]) -> Result<Option<String>> {
        match self.backend.get(&self.partition, key)? {
            Some(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            None => Ok(None),
        }
    }

    /// Inserts `key → primary_key`.
    ///
    /// Fails with `UniqueConstraintViolation` when the key is already
    /// mapped to a *different* primary key; re-inserting the same
    /// mapping is allowed so updates that keep a field unchanged don't
    /// trip the constraint.
    pub fn insert(&self, key: &[u8], primary_key: &str) -> Result<()> {
        if let Some(existing) = self.get(key)? {
            if existing != primary_key {
                return Err(StorageError::UniqueConstraintViolation(format!(
                    "index key already exists in {} for a different entity",
                    self.partition
                )));
            }
        }
        self.backend.put(&self.partition, key, primary_key.as_bytes())
    }

    /// Removes the entry for `key` if it is mapped to `primary_key`.
    ///
    /// A stale entry owned by another primary key is left alone.
    pub fn remove(&self, key: &[u8], primary_key: &str) -> Result<()> {
        match self.get(key)? {
            Some(existing) if existing == primary_key => self.backend.delete(&self.partition, key),
            _ => Ok(()),
        }
    }
}
