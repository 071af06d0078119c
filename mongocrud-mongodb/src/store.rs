use std::{future::Future, time::Duration};
use async_trait::async_trait;
use futures::TryStreamExt;
use bson::{Bson, Document, doc};
use mongodb::{
    Client, Collection as MongoCollection,
    options::ClientOptions,
};
use tracing::{debug, info};
use mongocrud_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
    query::{Filter, QueryVisitor, Update},
    record::{RecordId, ID_FIELD},
};

use crate::query::{MongoQueryTranslator, translate_update};

/// Default bound on establishing the connection, including the initial ping.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default deadline applied to every individual store call.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);


/// MongoDB-backed record store scoped to a single database.
///
/// Cloning is cheap; clones share the driver's connection pool.
#[derive(Debug, Clone)]
pub struct MongoDbStore {
    client: Client,
    database: String,
    operation_timeout: Duration,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String, operation_timeout: Duration) -> Self {
        Self { client, database, operation_timeout }
    }

    pub fn builder(uri: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(uri, database)
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }

    /// Runs one store call under the per-operation deadline.
    async fn bounded<T, F>(&self, operation: &str, call: F) -> StoreResult<T>
    where
        T: Send,
        F: Future<Output = mongodb::error::Result<T>> + Send,
    {
        tokio::time::timeout(self.operation_timeout, call)
            .await
            .map_err(|_| StoreError::Timeout(format!(
                "{operation} did not complete within {:?}",
                self.operation_timeout,
            )))?
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn run_ping(&self) -> mongodb::error::Result<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await?;

        Ok(())
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn ping(&self) -> StoreResult<()> {
        self.bounded("ping", self.run_ping()).await
    }

    async fn insert_document(&self, mut document: Document, collection: &str) -> StoreResult<RecordId> {
        document.remove(ID_FIELD);

        let handle = self.get_collection(collection);
        let result = self
            .bounded("insert", async move { handle.insert_one(document).await })
            .await?;

        match result.inserted_id {
            Bson::ObjectId(oid) => {
                debug!(collection, id = %oid, "inserted document");
                Ok(RecordId::from(oid))
            }
            other => Err(StoreError::Backend(format!("store returned a non-ObjectId id: {other}"))),
        }
    }

    async fn find_documents(&self, filter: &Filter, collection: &str) -> StoreResult<Vec<Document>> {
        let filter = MongoQueryTranslator.visit_filter(filter)?;
        debug!(collection, %filter, "find");

        let handle = self.get_collection(collection);

        self.bounded("find", async move {
            let cursor = handle.find(filter).await?;

            cursor.try_collect::<Vec<Document>>().await
        })
        .await
    }

    async fn find_document(&self, filter: &Filter, collection: &str) -> StoreResult<Option<Document>> {
        let filter = MongoQueryTranslator.visit_filter(filter)?;
        debug!(collection, %filter, "find one");

        let handle = self.get_collection(collection);

        self.bounded("find one", async move { handle.find_one(filter).await })
            .await
    }

    async fn update_document(&self, filter: &Filter, update: &Update, collection: &str) -> StoreResult<u64> {
        let filter = MongoQueryTranslator.visit_filter(filter)?;
        let update = translate_update(update);
        debug!(collection, %filter, %update, "update one");

        let handle = self.get_collection(collection);
        let result = self
            .bounded("update", async move { handle.update_one(filter, update).await })
            .await?;

        debug!(
            collection,
            matched = result.matched_count,
            modified = result.modified_count,
            "update applied"
        );

        Ok(result.modified_count)
    }

    async fn delete_document(&self, filter: &Filter, collection: &str) -> StoreResult<u64> {
        let filter = MongoQueryTranslator.visit_filter(filter)?;
        debug!(collection, %filter, "delete one");

        let handle = self.get_collection(collection);
        let result = self
            .bounded("delete", async move { handle.delete_one(filter).await })
            .await?;

        Ok(result.deleted_count)
    }

    async fn shutdown(&self) -> StoreResult<()> {
        self.client.clone().shutdown().await;
        info!(database = %self.database, "disconnected from MongoDB");

        Ok(())
    }
}

/// Connection provider for [`MongoDbStore`].
///
/// `build` parses the URI, creates the client and pings the server, all within
/// the connect timeout. Any failure is reported as [`StoreError::Connection`].
pub struct MongoDbStoreBuilder {
    uri: String,
    database: String,
    app_name: Option<String>,
    connect_timeout: Duration,
    operation_timeout: Duration,
}

impl MongoDbStoreBuilder {
    pub fn new(uri: &str, database: &str) -> Self {
        Self {
            uri: uri.to_string(),
            database: database.to_string(),
            app_name: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Sets the application name reported to the server.
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Bounds the whole connection sequence, including the initial ping.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the deadline applied to each store call after connecting.
    pub fn operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    async fn connect(self) -> StoreResult<MongoDbStore> {
        let mut options = ClientOptions::parse(&self.uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        options.connect_timeout = Some(self.connect_timeout);
        options.server_selection_timeout = Some(self.connect_timeout);
        if let Some(app_name) = self.app_name {
            options.app_name = Some(app_name);
        }

        let store = MongoDbStore::new(
            Client::with_options(options)
                .map_err(|e| StoreError::Connection(e.to_string()))?,
            self.database,
            self.operation_timeout,
        );

        store
            .run_ping()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(store)
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        let timeout = self.connect_timeout;
        let store = tokio::time::timeout(timeout, self.connect())
            .await
            .map_err(|_| StoreError::Connection(format!("no response from server within {timeout:?}")))??;

        info!(database = %store.database, "connected to MongoDB");

        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn unreachable_server_is_a_connection_error_within_the_timeout() {
        let started = Instant::now();

        let result = MongoDbStore::builder("mongodb://127.0.0.1:1", "mydb")
            .connect_timeout(Duration::from_millis(500))
            .build()
            .await;

        assert!(matches!(result, Err(StoreError::Connection(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn malformed_uri_is_a_connection_error() {
        let result = MongoDbStore::builder("not-a-mongodb-uri", "mydb").build().await;

        assert!(matches!(result, Err(StoreError::Connection(_))));
    }

    #[tokio::test]
    async fn calls_past_their_deadline_time_out() {
        let client = Client::with_options(ClientOptions::default()).unwrap();
        let store = MongoDbStore::new(client, "mydb".to_string(), Duration::from_millis(50));

        let result = store
            .bounded("op", std::future::pending::<mongodb::error::Result<()>>())
            .await;

        match result {
            Err(StoreError::Timeout(message)) => assert!(message.starts_with("op did not complete")),
            other => panic!("expected a timeout, got {other:?}"),
        }
    }
}
