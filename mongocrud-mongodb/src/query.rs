//! Translation of typed filters and updates into MongoDB query documents.

use bson::{Bson, Document, doc, oid::ObjectId};

use mongocrud_core::{
    error::StoreError,
    query::{QueryVisitor, Update},
    record::{Field, RecordId, ID_FIELD},
};


/// Translates [`Filter`](mongocrud_core::query::Filter)s into MongoDB filter documents.
pub(crate) struct MongoQueryTranslator;

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = StoreError;

    fn visit_all(&mut self) -> Result<Self::Output, Self::Error> {
        Ok(doc! {})
    }

    fn visit_equals(&mut self, field: Field, value: &str) -> Result<Self::Output, Self::Error> {
        let field = field.as_str();

        Ok(doc! { field: value })
    }

    fn visit_prefix(&mut self, field: Field, prefix: &str) -> Result<Self::Output, Self::Error> {
        let field = field.as_str();

        Ok(doc! {
            field: { "$regex": format!("^{}", regex::escape(prefix)) },
        })
    }

    fn visit_matches(&mut self, field: Field, pattern: &str) -> Result<Self::Output, Self::Error> {
        let field = field.as_str();

        Ok(doc! {
            field: { "$regex": pattern },
        })
    }

    fn visit_id(&mut self, id: &RecordId) -> Result<Self::Output, Self::Error> {
        Ok(doc! { ID_FIELD: ObjectId::from(*id) })
    }
}

/// Translates an [`Update`] into a `$set` update document.
pub(crate) fn translate_update(update: &Update) -> Document {
    doc! {
        "$set": Document::from_iter(
            update
                .assignments()
                .into_iter()
                .map(|(field, value)| (field.as_str().to_string(), Bson::String(value.to_string()))),
        ),
    }
}
