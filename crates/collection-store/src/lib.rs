//! File-Backed Record Collections
//!
//! Treats a single JSON array document on disk as a mutable record
//! collection: whole-file reads and writes, store-assigned identity,
//! and shallow payload validation. This crate knows nothing about HTTP;
//! the service crate maps verbs and paths onto these operations.

pub mod collection;
pub mod error;
pub mod store;
pub mod validation;

pub use collection::{Collection, Record, CREATED_AT_FIELD, ID_FIELD};
pub use error::{Result, StoreError};
pub use store::FileStore;
pub use validation::{validate, FieldRule, FieldType, Violation};
