//! Core of a minimal record CRUD layer over a document database.
//!
//! This crate provides:
//!
//! - **Record model** ([`record`]) - The record type, its store-generated identifier and fields
//! - **Filters and updates** ([`query`]) - A closed set of typed filters and field-level updates
//! - **Store backend abstraction** ([`backend`]) - The trait concrete stores implement
//! - **Collections** ([`collection`]) - The insert / find / update / delete operations
//! - **Record store** ([`store`]) - The long-lived handle that resolves collections
//! - **Error handling** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use mongocrud::prelude::*;
//!
//! let store = RecordStore::new(backend);
//! let users = store.collection("users");
//!
//! let id = users.insert(&Record::new("John", "test@example.com", "38")).await?;
//! let j_names = users.find(&Filter::starts_with(Field::Name, "J")).await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as mongocrud_core;

pub mod backend;
pub mod collection;
pub mod error;
pub mod query;
pub mod record;
pub mod store;
