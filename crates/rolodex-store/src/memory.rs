//! In-memory storage backend.
//!
//! Used by the integration tests and by dev mode (`storage.backend =
//! "memory"`). Data lives in per-partition ordered maps behind a single
//! RwLock; `batch` holds the write lock for the whole batch, which
//! makes it atomic with respect to every other operation.

use crate::storage_trait::{Operation, Partition, Result, StorageBackend, StorageError};
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

type Keyspace = BTreeMap<Vec<u8>, Vec<u8>>;

/// Thread-safe in-memory implementation of [`StorageBackend`].
#[derive(Default)]
pub struct InMemoryBackend {
    partitions: RwLock<HashMap<String, Keyspace>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for InMemoryBackend {
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let partitions = self
            .partitions
            .read()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        let keyspace = partitions
            .get(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        Ok(keyspace.get(key).cloned())
    }

    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()> {
        let mut partitions = self
            .partitions
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        let keyspace = partitions
            .get_mut(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        keyspace.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()> {
        let mut partitions = self
            .partitions
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        let keyspace = partitions
            .get_mut(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        keyspace.remove(key);
        Ok(())
    }

    fn batch(&self, operations: Vec<Operation>) -> Result<()> {
        let mut partitions = self
            .partitions
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;

        // Validate all target partitions before mutating anything so a
        // failed batch leaves the store untouched.
        for op in &operations {
            let name = match op {
                Operation::Put { partition, .. } => partition.name(),
                Operation::Delete { partition, .. } => partition.name(),
            };
            if !partitions.contains_key(name) {
                return Err(StorageError::PartitionNotFound(name.to_string()));
            }
        }

        for op in operations {
            match op {
                Operation::Put { partition, key, value } => {
                    partitions
                        .get_mut(partition.name())
                        .expect("partition checked above")
                        .insert(key, value);
                }
                Operation::Delete { partition, key } => {
                    partitions
                        .get_mut(partition.name())
                        .expect("partition checked above")
                        .remove(&key);
                }
            }
        }
        Ok(())
    }

    fn scan(&self, partition: &Partition, prefix: Option<&[u8]>) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let partitions = self
            .partitions
            .read()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        let keyspace = partitions
            .get(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;

        let entries = keyspace
            .iter()
            .filter(|(k, _)| prefix.map_or(true, |p| k.starts_with(p)))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(entries)
    }

    fn partition_exists(&self, partition: &Partition) -> bool {
        self.partitions
            .read()
            .map(|p| p.contains_key(partition.name()))
            .unwrap_or(false)
    }

    fn create_partition(&self, partition: &Partition) -> Result<()> {
        let mut partitions = self
            .partitions
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        partitions.entry(partition.name().to_string()).or_default();
        Ok(())
    }

    fn list_partitions(&self) -> Result<Vec<Partition>> {
        let partitions = self
            .partitions
            .read()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        Ok(partitions.keys().map(Partition::new).collect())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
