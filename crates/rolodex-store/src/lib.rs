//! Storage layer for Rolodex.
//!
//! The layering is:
//!
//! ```text
//! EntityStore<K, V>   ← typed CRUD with automatic JSON serialization
//!     ↓
//! StorageBackend      ← generic partitioned K/V operations
//!     ↓
//! RocksDB / in-memory ← actual storage implementation
//! ```
//!
//! Partitions map to RocksDB column families in the persistent backend
//! and to per-namespace maps in the in-memory backend.

pub mod entity_store;
pub mod index;
pub mod memory;
pub mod rocksdb_impl;
pub mod storage_trait;

pub use entity_store::EntityStore;
pub use index::UniqueIndex;
pub use memory::InMemoryBackend;
pub use rocksdb_impl::RocksDbBackend;
pub use storage_trait::{Operation, Partition, StorageBackend, StorageError};
