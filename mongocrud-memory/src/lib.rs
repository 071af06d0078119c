//! In-memory record storage backend for mongocrud.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It is meant for tests and local runs without a database server.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using an async-aware RwLock
//! - **Store-like semantics** - Generated ObjectIds, insertion-ordered scans, one-document updates and deletes
//! - **Full filter support** - Equality, literal prefix, regex and id filters
//! - **Outage simulation** - Switch the store offline to exercise error paths
//!
//! # Quick Start
//!
//! ```ignore
//! use mongocrud::{prelude::*, memory::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = RecordStore::new(InMemoryStore::builder().build().await?);
//!     let users = store.collection("users");
//!
//!     let id = users.insert(&Record::new("Alice", "alice@example.com", "30")).await?;
//!     assert!(users.find_by_id(id).await?.is_some());
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as mongocrud_memory;

pub mod store;
pub(crate) mod evaluator;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
