//! Gallery Storage Library
//!
//! This crate provides the object-store contract used by the remote photo provider
//! and its implementations: S3 (via `object_store`) and an in-process memory store.
//!
//! # Storage key format
//!
//! Photos are stored under a single prefix: `{prefix}/{upload_millis}-{filename}`.
//! The description travels with the object as user metadata. Key generation and
//! parsing are centralized in the `keys` module.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ObjectInfo, Storage, StorageError, StorageResult};
