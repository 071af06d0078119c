//! Main mongocrud crate providing a unified interface for record storage.
//!
//! This crate is the entry point for the web application and the script. It
//! re-exports the core types from the sub-crates and gives access to the
//! storage backends.
//!
//! # Quick Start
//!
//! ```ignore
//! use mongocrud::{prelude::*, memory::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> StoreResult<()> {
//!     let store = RecordStore::new(InMemoryStore::builder().build().await?);
//!     let users = store.collection("users");
//!
//!     let id = users.insert(&Record::new("John", "test@example.com", "38")).await?;
//!     users.update_by_id(id, &Update::set().name("Johnny")).await?;
//!
//!     let j_names = users.find(&Filter::starts_with(Field::Name, "J")).await?;
//!     println!("{j_names:?}");
//!
//!     store.shutdown().await
//! }
//! ```
//!
//! # Dynamic Dispatch
//!
//! Web handlers need a single concrete store type in their state. Convert a
//! typed store with `into_dyn` to get a [`DynRecordStore`](store::DynRecordStore)
//! whose backend is chosen at runtime:
//!
//! ```ignore
//! let store: DynRecordStore = RecordStore::new(InMemoryStore::new()).into_dyn();
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage for development and testing
//! - `mongodb` - MongoDB backend (requires the `mongodb` feature)

pub mod prelude;

pub use mongocrud_core::{backend, collection, error, query, record, store};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use mongocrud_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use mongocrud_mongodb::{
        MongoDbStore, MongoDbStoreBuilder, DEFAULT_CONNECT_TIMEOUT, DEFAULT_OPERATION_TIMEOUT,
    };
}
