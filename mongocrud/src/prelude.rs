//! Convenient re-exports of commonly used types from mongocrud.
//!
//! ```ignore
//! use mongocrud::prelude::*;
//! ```

pub use mongocrud_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    collection::RecordCollection,
    error::{StoreError, StoreResult},
    query::{Filter, QueryVisitor, Update},
    record::{Field, Record, RecordId},
    store::{DynRecordStore, RecordStore},
};
