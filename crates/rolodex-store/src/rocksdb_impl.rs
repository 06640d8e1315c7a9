//! RocksDB implementation of the storage backend.
//!
//! Partitions map to column families. The multi-threaded DB mode is
//! used so column families can be created after open without exclusive
//! access.

use crate::storage_trait::{Operation, Partition, Result, StorageBackend, StorageError};
use rocksdb::{
    DBWithThreadMode, Direction, IteratorMode, MultiThreaded, Options, WriteBatchWithTransaction,
};
use std::any::Any;
use std::path::{Path, PathBuf};

type Db = DBWithThreadMode<MultiThreaded>;

/// RocksDB-backed implementation of [`StorageBackend`].
pub struct RocksDbBackend {
    db: Db,
    path: PathBuf,
}

impl RocksDbBackend {
    /// Opens (or creates) the database at `path`.
    ///
    /// All column families already present on disk are reopened, so a
    /// restart sees every partition created by previous runs.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let existing = Db::list_cf(&opts, path.as_ref()).unwrap_or_default();
        let cf_names: Vec<&str> = if existing.is_empty() {
            vec!["default"]
        } else {
            existing.iter().map(|s| s.as_str()).collect()
        };

        let db = Db::open_cf(&opts, path.as_ref(), cf_names)
            .map_err(|e| StorageError::IoError(e.to_string()))?;
        Ok(Self { db, path: path.as_ref().to_path_buf() })
    }

    fn cf(&self, partition: &Partition) -> Result<std::sync::Arc<rocksdb::BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))
    }
}

impl StorageBackend for RocksDbBackend {
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let cf = self.cf(partition)?;
        self.db
            .get_cf(&cf, key)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()> {
        let cf = self.cf(partition)?;
        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()> {
        let cf = self.cf(partition)?;
        self.db
            .delete_cf(&cf, key)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn batch(&self, operations: Vec<Operation>) -> Result<()> {
        let mut batch = WriteBatchWithTransaction::<false>::default();
        for op in operations {
            match op {
                Operation::Put { partition, key, value } => {
                    let cf = self.cf(&partition)?;
                    batch.put_cf(&cf, key, value);
                }
                Operation::Delete { partition, key } => {
                    let cf = self.cf(&partition)?;
                    batch.delete_cf(&cf, key);
                }
            }
        }
        self.db
            .write(batch)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn scan(&self, partition: &Partition, prefix: Option<&[u8]>) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let cf = self.cf(partition)?;
        let mode = match prefix {
            Some(p) => IteratorMode::From(p, Direction::Forward),
            None => IteratorMode::Start,
        };

        let mut entries = Vec::new();
        for item in self.db.iterator_cf(&cf, mode) {
            let (key, value) = item.map_err(|e| StorageError::IoError(e.to_string()))?;
            if let Some(p) = prefix {
                if !key.starts_with(p) {
                    break;
                }
            }
            entries.push((key.to_vec(), value.to_vec()));
        }
        Ok(entries)
    }

    fn partition_exists(&self, partition: &Partition) -> bool {
        self.db.cf_handle(partition.name()).is_some()
    }

    fn create_partition(&self, partition: &Partition) -> Result<()> {
        if self.partition_exists(partition) {
            return Ok(());
        }
        self.db
            .create_cf(partition.name(), &Options::default())
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn list_partitions(&self) -> Result<Vec<Partition>> {
        // The open handle does not expose its column families, but the
        // MANIFEST on disk stays current as they are created.
        let names = Db::list_cf(&Options::default(), &self.path)
            .map_err(|e| StorageError::IoError(e.to_string()))?;
        Ok(names.into_iter().map(Partition::new).collect())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_put_get() {
        let dir = TempDir::new().unwrap();
        let backend = RocksDbBackend::open(dir.path()).unwrap();
        let partition = Partition::new("records");
        backend.create_partition(&partition).unwrap();

        backend.put(&partition, b"k1", b"v1").unwrap();
        assert_eq!(backend.get(&partition, b"k1").unwrap(), Some(b"v1".to_vec()));
        assert_eq!(backend.get(&partition, b"k2").unwrap(), None);
    }

    #[test]
    fn test_partitions_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let backend = RocksDbBackend::open(dir.path()).unwrap();
            let partition = Partition::new("records");
            backend.create_partition(&partition).unwrap();
            backend.put(&partition, b"k", b"v").unwrap();
        }

        let backend = RocksDbBackend::open(dir.path()).unwrap();
        let partition = Partition::new("records");
        assert!(backend.partition_exists(&partition));
        assert_eq!(backend.get(&partition, b"k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn test_batch_and_scan() {
        let dir = TempDir::new().unwrap();
        let backend = RocksDbBackend::open(dir.path()).unwrap();
        let partition = Partition::new("records");
        backend.create_partition(&partition).unwrap();

        backend
            .batch(vec![
                Operation::Put {
                    partition: partition.clone(),
                    key: b"a:1".to_vec(),
                    value: b"1".to_vec(),
                },
                Operation::Put {
                    partition: partition.clone(),
                    key: b"b:1".to_vec(),
                    value: b"2".to_vec(),
                },
            ])
            .unwrap();

        let all = backend.scan(&partition, None).unwrap();
        assert_eq!(all.len(), 2);
        let prefixed = backend.scan(&partition, Some(b"a:")).unwrap();
        assert_eq!(prefixed.len(), 1);
    }
}
