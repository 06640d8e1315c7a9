//! Record registry: the core of the Rolodex service.
//!
//! Enforces the uniqueness invariants (customer name and email, among
//! non-deleted records), assigns the monotonically increasing
//! `uniqueId` starting at 1234, and implements search, listing, and
//! soft deletion over the storage layer.

pub mod draft;
pub mod filter;
pub mod registry;

pub use draft::RecordDraft;
pub use filter::SearchFilter;
pub use registry::RecordRegistry;
