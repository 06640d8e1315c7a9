//! Typed storage keys.
//!
//! Entity stores are keyed by types implementing [`StorageKey`] rather
//! than raw strings, so a record id cannot be handed to the user store
//! by accident.

/// A value that can be encoded as a storage key.
pub trait StorageKey: Send + Sync {
    /// Byte encoding of this key as stored in the backend.
    fn storage_key(&self) -> Vec<u8>;
}

impl StorageKey for String {
    fn storage_key(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl StorageKey for &str {
    fn storage_key(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}
