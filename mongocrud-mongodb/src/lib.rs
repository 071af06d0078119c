//! MongoDB backend implementation for mongocrud.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait.
//!
//! To use this backend, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! mongocrud = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Connection
//!
//! [`MongoDbStoreBuilder`] is the connection provider: it parses the connection
//! string, creates the client and pings the server within a bounded connect timeout.
//! A failure at this step is a [`StoreError::Connection`](mongocrud_core::error::StoreError::Connection),
//! which applications treat as fatal. After connecting, every store call runs under
//! its own operation deadline.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use mongocrud::{backend::StoreBackendBuilder, mongodb::MongoDbStore, store::RecordStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = MongoDbStore::builder("mongodb://localhost:27017", "mydb")
//!         .connect_timeout(Duration::from_secs(10))
//!         .build()
//!         .await?;
//!
//!     let store = RecordStore::new(backend);
//!     let users = store.collection("users");
//!
//!     store.shutdown().await?;
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as mongocrud_mongodb;

pub mod store;
pub(crate) mod query;

pub use store::{MongoDbStore, MongoDbStoreBuilder, DEFAULT_CONNECT_TIMEOUT, DEFAULT_OPERATION_TIMEOUT};
