//! In-memory storage implementation for record stores.
//!
//! Documents are kept per collection in insertion order behind an async-safe
//! read-write lock. Identifiers are generated the way a document store would,
//! as fresh ObjectIds.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use bson::{Bson, Document, oid::ObjectId};

use mongocrud_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
    query::{Filter, Update},
    record::{RecordId, ID_FIELD},
};

use crate::evaluator::DocumentEvaluator;

type CollectionDocs = Vec<Document>;
type StoreMap = HashMap<String, CollectionDocs>;


/// Thread-safe in-memory record storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, so
/// clones share the same data. It can be switched offline with
/// [`set_available`](InMemoryStore::set_available), after which every call fails
/// with [`StoreError::Backend`] the way a lost connection would.
///
/// # Example
///
/// ```ignore
/// use mongocrud_memory::InMemoryStore;
/// use mongocrud::backend::StoreBackend;
/// use mongocrud::query::Filter;
/// use bson::doc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///
///     let id = store
///         .insert_document(doc! { "name": "Alice", "email": "a@example.com", "age": "30" }, "users")
///         .await?;
///
///     let doc = store.find_document(&Filter::ById(id), "users").await?;
///     assert!(doc.is_some());
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> documents in insertion order
    store: Arc<RwLock<StoreMap>>,
    available: Arc<AtomicBool>,
}

impl InMemoryStore {
    /// Creates a new empty, available in-memory store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    /// Marks the store as reachable or unreachable.
    ///
    /// Affects every clone sharing this store's state.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Returns the number of documents currently held in `collection`.
    pub async fn document_count(&self, collection: &str) -> usize {
        self.store
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Backend("store unavailable".to_string()))
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}


#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.check_available()
    }

    async fn insert_document(&self, document: Document, collection: &str) -> StoreResult<RecordId> {
        self.check_available()?;

        let oid = ObjectId::new();
        let stored = Document::from_iter(
            std::iter::once((ID_FIELD.to_string(), Bson::ObjectId(oid)))
                .chain(
                    document
                        .into_iter()
                        .filter(|(key, _)| key != ID_FIELD)
                ),
        );

        self.store
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(stored);

        Ok(RecordId::from(oid))
    }

    async fn find_documents(&self, filter: &Filter, collection: &str) -> StoreResult<Vec<Document>> {
        self.check_available()?;
        DocumentEvaluator::validate(filter)?;

        let store = self.store.read().await;
        let docs = match store.get(collection) {
            Some(docs) => docs,
            None => return Ok(vec![]),
        };

        Ok(
            DocumentEvaluator::filter_documents(docs, filter)?
                .into_iter()
                .cloned()
                .collect()
        )
    }

    async fn find_document(&self, filter: &Filter, collection: &str) -> StoreResult<Option<Document>> {
        self.check_available()?;
        DocumentEvaluator::validate(filter)?;

        let store = self.store.read().await;
        let docs = match store.get(collection) {
            Some(docs) => docs,
            None => return Ok(None),
        };

        Ok(
            DocumentEvaluator::position(docs, filter)?
                .map(|index| docs[index].clone())
        )
    }

    async fn update_document(&self, filter: &Filter, update: &Update, collection: &str) -> StoreResult<u64> {
        self.check_available()?;
        DocumentEvaluator::validate(filter)?;

        let mut store = self.store.write().await;
        let docs = match store.get_mut(collection) {
            Some(docs) => docs,
            None => return Ok(0),
        };

        let Some(index) = DocumentEvaluator::position(docs, filter)? else {
            return Ok(0);
        };

        let document = &mut docs[index];
        let mut changed = false;

        for (field, value) in update.assignments() {
            let value = Bson::String(value.to_string());

            if document.get(field.as_str()) != Some(&value) {
                document.insert(field.as_str(), value);
                changed = true;
            }
        }

        Ok(u64::from(changed))
    }

    async fn delete_document(&self, filter: &Filter, collection: &str) -> StoreResult<u64> {
        self.check_available()?;
        DocumentEvaluator::validate(filter)?;

        let mut store = self.store.write().await;
        let docs = match store.get_mut(collection) {
            Some(docs) => docs,
            None => return Ok(0),
        };

        match DocumentEvaluator::position(docs, filter)? {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}


/// Builder for constructing [`InMemoryStore`] instances.
///
/// Building always succeeds: there is nothing to connect to.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}
