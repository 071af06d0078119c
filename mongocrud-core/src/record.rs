//! The record model and its identifier.
//!
//! A [`Record`] is a flat document of three free-text fields plus a store-generated
//! [`RecordId`]. The identifier is a BSON ObjectId inside the store and a 24 character
//! hex string everywhere else.

use bson::{
    Document,
    de::deserialize_from_document,
    oid::ObjectId,
    ser::serialize_to_document,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::{StoreError, StoreResult};

/// Name of the identifier field in stored documents.
pub const ID_FIELD: &str = "_id";

/// Opaque identifier assigned by the store when a record is inserted.
///
/// Parse one from its hex form with [`str::parse`]:
///
/// ```ignore
/// let id: RecordId = "65a1f0c2e4b0a1b2c3d4e5f6".parse()?;
/// assert_eq!(id.to_hex(), "65a1f0c2e4b0a1b2c3d4e5f6");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(ObjectId);

impl RecordId {
    /// Returns the lowercase hex form of this identifier.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Returns the underlying BSON ObjectId.
    pub fn as_object_id(&self) -> &ObjectId {
        &self.0
    }
}

impl From<ObjectId> for RecordId {
    fn from(oid: ObjectId) -> Self {
        RecordId(oid)
    }
}

impl From<RecordId> for ObjectId {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl FromStr for RecordId {
    type Err = StoreError;

    fn from_str(s: &str) -> StoreResult<Self> {
        ObjectId::parse_str(s)
            .map(RecordId)
            .map_err(|_| StoreError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The mutable fields of a [`Record`].
///
/// Filters and updates can only ever name one of these; the identifier is
/// addressed separately through [`Filter::ById`](crate::query::Filter::ById).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Age,
}

impl Field {
    /// Returns the stored field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Age => "age",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single stored record.
///
/// `id` is `None` until the record has been inserted. All other fields are free
/// text, age included; nothing is ever coerced to a number.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    pub age: String,
}

impl Record {
    /// Creates a record that has not been inserted yet.
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            age: age.into(),
        }
    }

    /// Returns the value of one of the mutable fields.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Age => &self.age,
        }
    }

    /// Converts this record to the BSON document submitted on insert.
    ///
    /// The identifier is always left out so that the store assigns a fresh one.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_insert_document(&self) -> StoreResult<Document> {
        let mut document = serialize_to_document(self)?;
        document.remove(ID_FIELD);

        Ok(document)
    }

    /// Creates a record from a stored BSON document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if a field is missing or has the wrong type.
    pub fn from_document(document: Document) -> StoreResult<Self> {
        Ok(deserialize_from_document(document)?)
    }
}
