//! The record registry.
//!
//! All write paths run under a single registry-wide lock so the
//! check-allocate-insert sequence is race-free within the process; the
//! unique secondary indexes on customer name and email act as a second
//! line of defense at the storage layer. The `uniqueId` sequence is
//! persisted in its own partition and seeded from the stored maximum at
//! startup, so identifiers survive restarts and are never reused.

use crate::draft::RecordDraft;
use crate::filter::SearchFilter;
use chrono::Utc;
use log::{debug, info};
use rolodex_commons::{Record, RecordId, RegistryError, Result};
use rolodex_store::{EntityStore, Partition, StorageBackend, StorageError, UniqueIndex};
use std::sync::{Arc, Mutex};

/// First `uniqueId` ever assigned.
pub const FIRST_UNIQUE_ID: u64 = 1234;

const RECORDS_PARTITION: &str = "records";
const NAME_INDEX_PARTITION: &str = "idx_records_name";
const EMAIL_INDEX_PARTITION: &str = "idx_records_email";
const META_PARTITION: &str = "registry_meta";
const SEQ_KEY: &[u8] = b"next_unique_id";

fn storage(err: StorageError) -> RegistryError {
    RegistryError::storage(err.to_string())
}

struct RecordStore {
    backend: Arc<dyn StorageBackend>,
}

impl EntityStore<RecordId, Record> for RecordStore {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        RECORDS_PARTITION
    }
}

/// Validation, identity assignment, search, and soft deletion for
/// contact records.
pub struct RecordRegistry {
    store: RecordStore,
    name_idx: UniqueIndex,
    email_idx: UniqueIndex,
    backend: Arc<dyn StorageBackend>,
    // Serializes check-allocate-insert across writers.
    write_lock: Mutex<()>,
}

impl RecordRegistry {
    /// Opens the registry over a backend, creating partitions, seeding
    /// the id sequence from the stored maximum, and rebuilding the
    /// uniqueness indexes from the live records.
    pub fn open(backend: Arc<dyn StorageBackend>) -> Result<Self> {
        for name in [RECORDS_PARTITION, META_PARTITION] {
            backend.create_partition(&Partition::new(name)).map_err(storage)?;
        }
        let name_idx = UniqueIndex::new(backend.clone(), NAME_INDEX_PARTITION).map_err(storage)?;
        let email_idx = UniqueIndex::new(backend.clone(), EMAIL_INDEX_PARTITION).map_err(storage)?;

        let registry = Self {
            store: RecordStore { backend: backend.clone() },
            name_idx,
            email_idx,
            backend,
            write_lock: Mutex::new(()),
        };

        registry.seed_sequence()?;
        registry.rebuild_indexes()?;
        Ok(registry)
    }

    /// Seeds the persisted sequence so the next allocation is
    /// `max(stored next, max uniqueId on disk + 1, 1234)`. Deleted
    /// records count toward the maximum: ids are never reused.
    fn seed_sequence(&self) -> Result<()> {
        let stored_next = self.read_sequence()?;
        let max_on_disk = self
            .store
            .scan_all()
            .map_err(storage)?
            .iter()
            .map(|(_, r)| r.unique_id)
            .max();

        let next = stored_next
            .unwrap_or(FIRST_UNIQUE_ID)
            .max(max_on_disk.map_or(FIRST_UNIQUE_ID, |m| m + 1));
        self.write_sequence(next)?;
        info!("record id sequence seeded at {}", next);
        Ok(())
    }

    fn rebuild_indexes(&self) -> Result<()> {
        for (_, record) in self.store.scan_all().map_err(storage)? {
            if record.is_deleted {
                continue;
            }
            let pk = record.id.as_str();
            self.name_idx
                .insert(record.name_key().as_bytes(), pk)
                .map_err(storage)?;
            self.email_idx
                .insert(record.email_key().as_bytes(), pk)
                .map_err(storage)?;
        }
        Ok(())
    }

    fn read_sequence(&self) -> Result<Option<u64>> {
        let bytes = self
            .backend
            .get(&Partition::new(META_PARTITION), SEQ_KEY)
            .map_err(storage)?;
        match bytes {
            Some(b) => {
                let text = String::from_utf8_lossy(&b);
                let value = text
                    .parse::<u64>()
                    .map_err(|_| RegistryError::storage(format!("corrupt id sequence: {}", text)))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn write_sequence(&self, next: u64) -> Result<()> {
        self.backend
            .put(&Partition::new(META_PARTITION), SEQ_KEY, next.to_string().as_bytes())
            .map_err(storage)
    }

    /// Takes the next `uniqueId`. Caller must hold the write lock.
    fn allocate_unique_id(&self) -> Result<u64> {
        let next = self.read_sequence()?.unwrap_or(FIRST_UNIQUE_ID);
        self.write_sequence(next + 1)?;
        Ok(next)
    }

    /// Creates a record from a validated candidate.
    ///
    /// Duplicate precedence follows the contract: the identity check
    /// runs before the email check, so a candidate that collides on
    /// both reports the name collision.
    pub fn create(&self, draft: &RecordDraft) -> Result<Record> {
        let segmentation = draft.validate()?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| RegistryError::storage(e.to_string()))?;

        let now = Utc::now();
        let record = Record {
            id: RecordId::generate(),
            unique_id: 0, // assigned below, after the duplicate checks
            customer_name: draft.customer_name.trim().to_string(),
            designation: draft.designation.trim().to_string(),
            city: draft.city.trim().to_string(),
            segmentation,
            email: draft.email.trim().to_string(),
            phone: draft.phone.clone(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };

        if self
            .name_idx
            .get(record.name_key().as_bytes())
            .map_err(storage)?
            .is_some()
        {
            return Err(RegistryError::DuplicateName);
        }
        if self
            .email_idx
            .get(record.email_key().as_bytes())
            .map_err(storage)?
            .is_some()
        {
            return Err(RegistryError::DuplicateEmail);
        }

        let record = Record { unique_id: self.allocate_unique_id()?, ..record };

        self.name_idx
            .insert(record.name_key().as_bytes(), record.id.as_str())
            .map_err(|e| match e {
                StorageError::UniqueConstraintViolation(_) => RegistryError::DuplicateName,
                other => storage(other),
            })?;
        self.email_idx
            .insert(record.email_key().as_bytes(), record.id.as_str())
            .map_err(|e| match e {
                StorageError::UniqueConstraintViolation(_) => RegistryError::DuplicateEmail,
                other => storage(other),
            })?;

        self.store.put(&record.id, &record).map_err(storage)?;
        debug!("created record {} (uniqueId {})", record.id, record.unique_id);
        Ok(record)
    }

    /// Updates every descriptive field of an existing record.
    ///
    /// `uniqueId` and `isDeleted` are owned by the registry and survive
    /// the update untouched. Updating a soft-deleted record is allowed
    /// and does not resurrect it.
    pub fn update(&self, id: &RecordId, draft: &RecordDraft) -> Result<Record> {
        let segmentation = draft.validate()?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| RegistryError::storage(e.to_string()))?;

        let existing = self
            .store
            .get(id)
            .map_err(storage)?
            .ok_or_else(|| RegistryError::not_found("Record not found"))?;

        let updated = Record {
            id: existing.id.clone(),
            unique_id: existing.unique_id,
            customer_name: draft.customer_name.trim().to_string(),
            designation: draft.designation.trim().to_string(),
            city: draft.city.trim().to_string(),
            segmentation,
            email: draft.email.trim().to_string(),
            phone: draft.phone.clone(),
            is_deleted: existing.is_deleted,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        // Uniqueness checks exclude the record under update so it can
        // keep its own name/email unchanged.
        if let Some(owner) = self
            .name_idx
            .get(updated.name_key().as_bytes())
            .map_err(storage)?
        {
            if owner != id.as_str() {
                return Err(RegistryError::DuplicateName);
            }
        }
        if let Some(owner) = self
            .email_idx
            .get(updated.email_key().as_bytes())
            .map_err(storage)?
        {
            if owner != id.as_str() {
                return Err(RegistryError::DuplicateEmail);
            }
        }

        // Soft-deleted records hold no index entries.
        if !existing.is_deleted {
            if existing.name_key() != updated.name_key() {
                self.name_idx
                    .remove(existing.name_key().as_bytes(), id.as_str())
                    .map_err(storage)?;
            }
            if existing.email_key() != updated.email_key() {
                self.email_idx
                    .remove(existing.email_key().as_bytes(), id.as_str())
                    .map_err(storage)?;
            }
            self.name_idx
                .insert(updated.name_key().as_bytes(), id.as_str())
                .map_err(storage)?;
            self.email_idx
                .insert(updated.email_key().as_bytes(), id.as_str())
                .map_err(storage)?;
        }

        self.store.put(id, &updated).map_err(storage)?;
        debug!("updated record {}", id);
        Ok(updated)
    }

    /// Marks a record deleted. Deleting an already-deleted record
    /// reports the same success; callers cannot tell the two apart.
    pub fn soft_delete(&self, id: &RecordId) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| RegistryError::storage(e.to_string()))?;

        let mut record = self
            .store
            .get(id)
            .map_err(storage)?
            .ok_or_else(|| RegistryError::not_found("Record not found"))?;

        if !record.is_deleted {
            self.name_idx
                .remove(record.name_key().as_bytes(), id.as_str())
                .map_err(storage)?;
            self.email_idx
                .remove(record.email_key().as_bytes(), id.as_str())
                .map_err(storage)?;
            record.is_deleted = true;
            record.updated_at = Utc::now();
            self.store.put(id, &record).map_err(storage)?;
            debug!("soft-deleted record {}", id);
        }
        Ok(())
    }

    /// Marks every record deleted, unconditionally. Returns the number
    /// of records touched. Never fails on an empty store.
    pub fn soft_delete_all(&self) -> Result<usize> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| RegistryError::storage(e.to_string()))?;

        let all = self.store.scan_all().map_err(storage)?;
        let count = all.len();
        let now = Utc::now();
        for (_, mut record) in all {
            if !record.is_deleted {
                self.name_idx
                    .remove(record.name_key().as_bytes(), record.id.as_str())
                    .map_err(storage)?;
                self.email_idx
                    .remove(record.email_key().as_bytes(), record.id.as_str())
                    .map_err(storage)?;
            }
            record.is_deleted = true;
            record.updated_at = now;
            let id = record.id.clone();
            self.store.put(&id, &record).map_err(storage)?;
        }
        info!("soft-deleted all records ({})", count);
        Ok(count)
    }

    /// Returns every non-deleted record, ordered by `uniqueId`.
    pub fn list_all(&self) -> Result<Vec<Record>> {
        let mut records: Vec<Record> = self
            .store
            .scan_all()
            .map_err(storage)?
            .into_iter()
            .map(|(_, r)| r)
            .filter(|r| !r.is_deleted)
            .collect();
        records.sort_by_key(|r| r.unique_id);
        Ok(records)
    }

    /// Returns non-deleted records matching the filter, ordered by
    /// `uniqueId`. An empty filter matches nothing.
    pub fn search(&self, filter: &SearchFilter) -> Result<Vec<Record>> {
        if filter.is_empty() {
            return Ok(Vec::new());
        }
        let mut records: Vec<Record> = self
            .store
            .scan_all()
            .map_err(storage)?
            .into_iter()
            .map(|(_, r)| r)
            .filter(|r| !r.is_deleted && filter.matches(r))
            .collect();
        records.sort_by_key(|r| r.unique_id);
        Ok(records)
    }

    /// Direct lookup by document id. Soft-deleted records are returned
    /// with `isDeleted = true`.
    pub fn get(&self, id: &RecordId) -> Result<Record> {
        self.store
            .get(id)
            .map_err(storage)?
            .ok_or_else(|| RegistryError::not_found("Record not found"))
    }
}
