//! Collection handles and the CRUD operations on records.
//!
//! A [`RecordCollection`] is a cheap, borrowed view of one named collection on a
//! backend. It converts between [`Record`]s and the backend's BSON documents and
//! exposes the insert / find / update / delete operations.
//!
//! # Example
//!
//! ```ignore
//! use mongocrud::prelude::*;
//!
//! # async fn example(store: &RecordStore<impl StoreBackend>) -> StoreResult<()> {
//! let users = store.collection("users");
//!
//! let id = users.insert(&Record::new("John", "test@example.com", "38")).await?;
//! let modified = users.update_by_id(id, &Update::set().name("Johnny")).await?;
//! assert_eq!(modified, 1);
//! # Ok(()) }
//! ```

use crate::{
    backend::StoreBackend,
    error::StoreResult,
    query::{Filter, Update},
    record::{Record, RecordId},
};

/// A collection of records on a storage backend.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the backend reference
/// * `B` - The storage backend type
#[derive(Debug)]
pub struct RecordCollection<'a, B: StoreBackend> {
    name: String,
    backend: &'a B,
}

impl<'a, B: StoreBackend> RecordCollection<'a, B> {
    /// Creates a new collection reference (internal use).
    pub(crate) fn new(name: String, backend: &'a B) -> Self {
        Self { name, backend }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a record and returns its store-generated identifier.
    ///
    /// Any identifier already set on `record` is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if the write is rejected.
    pub async fn insert(&self, record: &Record) -> StoreResult<RecordId> {
        self.backend
            .insert_document(record.to_insert_document()?, self.name())
            .await
    }

    /// Returns all records matching `filter`.
    ///
    /// Records come back in the order the store yields them. If any document
    /// fails to decode, the whole scan fails and no records are returned.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) on cursor or decode failure.
    pub async fn find(&self, filter: &Filter) -> StoreResult<Vec<Record>> {
        self.backend
            .find_documents(filter, self.name())
            .await?
            .into_iter()
            .map(Record::from_document)
            .collect()
    }

    /// Returns every record in the collection.
    pub async fn find_all(&self) -> StoreResult<Vec<Record>> {
        self.find(&Filter::All).await
    }

    /// Returns the first record matching `filter`, or `None`.
    pub async fn find_one(&self, filter: &Filter) -> StoreResult<Option<Record>> {
        self.backend
            .find_document(filter, self.name())
            .await?
            .map(Record::from_document)
            .transpose()
    }

    /// Returns the record with the given identifier, or `None`.
    pub async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<Record>> {
        self.find_one(&Filter::ById(id)).await
    }

    /// Applies `update` to one record matching `filter`.
    ///
    /// # Returns
    ///
    /// The number of records modified: 0 when nothing matched or nothing changed.
    /// An update that sets no fields never reaches the backend.
    pub async fn update(&self, filter: &Filter, update: &Update) -> StoreResult<u64> {
        if update.is_empty() {
            return Ok(0);
        }

        self.backend
            .update_document(filter, update, self.name())
            .await
    }

    /// Applies `update` to the record with the given identifier.
    pub async fn update_by_id(&self, id: RecordId, update: &Update) -> StoreResult<u64> {
        self.update(&Filter::ById(id), update).await
    }

    /// Deletes one record matching `filter`.
    ///
    /// When several records match, exactly one of them is removed.
    ///
    /// # Returns
    ///
    /// The number of records removed (0 or 1).
    pub async fn delete(&self, filter: &Filter) -> StoreResult<u64> {
        self.backend
            .delete_document(filter, self.name())
            .await
    }

    /// Deletes the record with the given identifier.
    pub async fn delete_by_id(&self, id: RecordId) -> StoreResult<u64> {
        self.delete(&Filter::ById(id)).await
    }
}
