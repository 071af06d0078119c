//! The record store: one long-lived backend handle shared by every operation.
//!
//! A [`RecordStore`] is created once at startup, passed to whatever needs it, and
//! shut down once on exit. [`DynRecordStore`] erases the backend type so the handle
//! can live in framework state.
//!
//! # Example
//!
//! ```ignore
//! use mongocrud::store::RecordStore;
//!
//! let store = RecordStore::new(backend);
//! let clients = store.collection("clients");
//! // ...
//! store.shutdown().await?;
//! ```

use crate::{
    backend::StoreBackend,
    collection::RecordCollection,
    error::StoreResult,
};

/// A record store bound to a specific backend implementation.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct RecordStore<B: StoreBackend> {
    backend: B,
}

/// A record store whose backend is only known at runtime.
pub type DynRecordStore = RecordStore<Box<dyn StoreBackend>>;

impl<B: StoreBackend> RecordStore<B> {
    /// Creates a new record store with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Resolves a collection by name within the backend's database.
    ///
    /// This never touches the store; the collection is created on first write.
    pub fn collection<'a>(&'a self, name: &str) -> RecordCollection<'a, B> {
        RecordCollection::new(name.to_string(), &self.backend)
    }

    /// Checks that the backend is reachable.
    pub async fn ping(&self) -> StoreResult<()> {
        self.backend.ping().await
    }

    /// Releases the backend connection.
    pub async fn shutdown(&self) -> StoreResult<()> {
        self.backend.shutdown().await
    }

    /// Erases the backend type.
    pub fn into_dyn(self) -> DynRecordStore
    where
        B: 'static,
    {
        RecordStore::new(Box::new(self.backend) as Box<dyn StoreBackend>)
    }
}
