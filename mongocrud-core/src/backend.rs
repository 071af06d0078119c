//! Storage backend abstraction for the record store.
//!
//! The [`StoreBackend`] trait is the seam between the CRUD layer and a concrete
//! document store. Each method is a single independent round trip against one
//! collection of a fixed database; there is no transaction or retry at this level.
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`StoreBackendBuilder`]: Factory trait that establishes a backend connection
//!
//! # Examples
//!
//! ```ignore
//! use mongocrud::backend::StoreBackend;
//! use mongocrud::query::Filter;
//! use bson::doc;
//!
//! let backend = MyBackendImpl::new();
//!
//! let id = backend
//!     .insert_document(doc! { "name": "Alice", "email": "a@example.com", "age": "30" }, "users")
//!     .await?;
//! let found = backend.find_document(&Filter::ById(id), "users").await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use bson::Document;
use std::fmt::Debug;

use crate::{
    error::StoreResult,
    query::{Filter, Update},
    record::RecordId,
};

/// Abstract interface for record storage backends.
///
/// # Thread Safety
///
/// Implementations are shared by every request handler of a process and must
/// support concurrent access. Connection pooling, if any, is internal to the backend.
///
/// # Error Handling
///
/// Operations return [`StoreResult<T>`](crate::error::StoreResult). A call that
/// matches nothing is not an error: counts are simply zero.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Checks that the store is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// Inserts one document and returns the identifier the store assigned to it.
    ///
    /// Any `_id` already present on `document` is ignored. The collection is
    /// created implicitly if it doesn't exist.
    async fn insert_document(&self, document: Document, collection: &str) -> StoreResult<RecordId>;

    /// Returns every document matching `filter`, in the order the store yields them.
    ///
    /// Returned documents include their `_id` field.
    async fn find_documents(&self, filter: &Filter, collection: &str) -> StoreResult<Vec<Document>>;

    /// Returns the first document matching `filter`, if any.
    async fn find_document(&self, filter: &Filter, collection: &str) -> StoreResult<Option<Document>>;

    /// Applies `update` to one document matching `filter`.
    ///
    /// # Returns
    ///
    /// The number of documents whose content actually changed (0 or 1).
    async fn update_document(
        &self,
        filter: &Filter,
        update: &Update,
        collection: &str,
    ) -> StoreResult<u64>;

    /// Deletes one arbitrary document matching `filter`.
    ///
    /// # Returns
    ///
    /// The number of documents removed (0 or 1).
    async fn delete_document(&self, filter: &Filter, collection: &str) -> StoreResult<u64>;

    /// Releases the connection held by this backend.
    ///
    /// The default implementation is a no-op; backends with external connections
    /// should override it.
    async fn shutdown(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[async_trait]
impl<B> StoreBackend for Box<B>
where
    B: StoreBackend + ?Sized,
{
    async fn ping(&self) -> StoreResult<()> {
        (**self).ping().await
    }

    async fn insert_document(&self, document: Document, collection: &str) -> StoreResult<RecordId> {
        (**self)
            .insert_document(document, collection)
            .await
    }

    async fn find_documents(&self, filter: &Filter, collection: &str) -> StoreResult<Vec<Document>> {
        (**self)
            .find_documents(filter, collection)
            .await
    }

    async fn find_document(&self, filter: &Filter, collection: &str) -> StoreResult<Option<Document>> {
        (**self)
            .find_document(filter, collection)
            .await
    }

    async fn update_document(
        &self,
        filter: &Filter,
        update: &Update,
        collection: &str,
    ) -> StoreResult<u64> {
        (**self)
            .update_document(filter, update, collection)
            .await
    }

    async fn delete_document(&self, filter: &Filter, collection: &str) -> StoreResult<u64> {
        (**self)
            .delete_document(filter, collection)
            .await
    }

    async fn shutdown(&self) -> StoreResult<()> {
        (**self).shutdown().await
    }
}

/// Factory for backends that need to connect before they can be used.
///
/// `build` is the connection step: it either returns a live backend or fails
/// with [`StoreError::Connection`](crate::error::StoreError::Connection).
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> StoreResult<Self::Backend>;
}
