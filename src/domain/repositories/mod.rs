//! Storage contracts for the domain layer.
//!
//! The domain only depends on the [`KeyValueStore`] trait. Concrete adapters
//! live in `crate::infrastructure::store`, and a `mockall` mock is generated for
//! unit tests.

pub mod kv_store;

pub use kv_store::{KeyValueStore, StoreError, StoreResult};

#[cfg(test)]
pub use kv_store::MockKeyValueStore;
