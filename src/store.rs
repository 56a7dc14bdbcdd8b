use std::time::Duration;

use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::ClientOptions,
    Client, Collection,
};
use serde::{Deserialize, Serialize};

fn default_server_selection_timeout_secs() -> u64 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// MongoDB connection string.
    pub uri: String,
    pub database: String,
    pub collection: String,
    /// How long the driver waits for a reachable server before giving up.
    #[serde(default = "default_server_selection_timeout_secs")]
    pub server_selection_timeout_secs: u64,
}

/// A book as it lives in the collection.
///
/// Every field is optional. Absent fields are omitted from the stored
/// document, not defaulted. The `ISBN` casing is the collection's historical
/// field name.
#[derive(Debug, Serialize, Deserialize)]
pub struct BookDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(rename = "ISBN", skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The given id is not a well-formed ObjectId hex string.
    #[error("Invalid book id: {0}")]
    InvalidId(#[from] mongodb::bson::oid::Error),
    /// No book matches the given id.
    #[error("Book not found")]
    NotFound,
    /// The driver failed. Connectivity, write failures, cursor failures.
    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}

/// Data access for the books collection.
///
/// Holds a typed handle onto one collection of a pooled [`Client`] created
/// once at startup. Cloning is cheap and every clone shares the pool.
#[derive(Debug, Clone)]
pub struct BookStore {
    collection: Collection<BookDocument>,
}

impl BookStore {
    /// Builds the pooled client and targets the configured collection.
    ///
    /// The driver connects lazily. An unreachable server surfaces on the
    /// first operation, after the configured server selection timeout.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.server_selection_timeout = Some(Duration::from_secs(
            config.server_selection_timeout_secs,
        ));

        let client = Client::with_options(options)?;
        let collection = client
            .database(&config.database)
            .collection(&config.collection);

        Ok(Self { collection })
    }

    /// Parses a path id into an [`ObjectId`].
    pub fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
        Ok(ObjectId::parse_str(id)?)
    }

    /// Inserts a new book and returns its assigned id.
    ///
    /// The id is assigned here. Whatever id the document carried is replaced.
    pub async fn insert(&self, mut document: BookDocument) -> Result<ObjectId, StoreError> {
        let id = ObjectId::new();
        document.id = Some(id);

        self.collection.insert_one(&document).await?;

        Ok(id)
    }

    /// Replaces the stored fields of the book matching `id`.
    ///
    /// Replace, not patch: fields absent from `document` end up absent in the
    /// stored record. Fails with [`StoreError::NotFound`] when no book
    /// matches.
    pub async fn replace(&self, id: ObjectId, mut document: BookDocument) -> Result<(), StoreError> {
        document.id = Some(id);

        let result = self
            .collection
            .replace_one(doc! { "_id": id }, &document)
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    /// Returns every book in the collection, in natural iteration order.
    pub async fn list(&self) -> Result<Vec<BookDocument>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents = cursor.try_collect().await?;

        Ok(documents)
    }

    /// Returns the book matching `id`.
    pub async fn get(&self, id: ObjectId) -> Result<BookDocument, StoreError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Deletes the book matching `id` and returns it.
    pub async fn remove(&self, id: ObjectId) -> Result<BookDocument, StoreError> {
        self.collection
            .find_one_and_delete(doc! { "_id": id })
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Deletes every book in the collection and returns the count deleted.
    pub async fn clear(&self) -> Result<u64, StoreError> {
        let result = self.collection.delete_many(doc! {}).await?;

        Ok(result.deleted_count)
    }
}
