//! Filter evaluation for in-memory record documents.
//!
//! This module evaluates [`Filter`]s directly against stored BSON documents.
//! Regular expressions are compiled once per query and reused across documents.

use std::collections::HashMap;
use bson::{Bson, Document};
use regex::Regex;

use mongocrud_core::{
    query::{Filter, QueryVisitor},
    error::{StoreError, StoreResult},
    record::{Field, RecordId, ID_FIELD},
};


/// Compiled regular expressions keyed by their source pattern.
#[derive(Debug, Default)]
pub(crate) struct PatternCache {
    compiled: HashMap<String, Regex>,
}

impl PatternCache {
    fn get(&mut self, pattern: &str) -> StoreResult<&Regex> {
        if !self.compiled.contains_key(pattern) {
            let regex = Regex::new(pattern)
                .map_err(|e| StoreError::InvalidQuery(format!("invalid pattern {pattern:?}: {e}")))?;
            self.compiled.insert(pattern.to_string(), regex);
        }

        Ok(&self.compiled[pattern])
    }
}


/// Evaluates a filter against a single document.
pub(crate) struct DocumentEvaluator<'a, 'p> {
    document: &'a Document,
    patterns: &'p mut PatternCache,
}

impl<'a, 'p> DocumentEvaluator<'a, 'p> {
    pub fn new(document: &'a Document, patterns: &'p mut PatternCache) -> Self {
        Self { document, patterns }
    }

    pub fn evaluate(&mut self, filter: &Filter) -> StoreResult<bool> {
        self.visit_filter(filter)
    }

    fn text(&self, field: Field) -> Option<&'a str> {
        match self.document.get(field.as_str()) {
            Some(Bson::String(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Checks that `filter` can be evaluated at all, independent of any document.
    pub fn validate(filter: &Filter) -> StoreResult<()> {
        if let Filter::Matches { pattern, .. } = filter {
            PatternCache::default().get(pattern)?;
        }

        Ok(())
    }

    /// Returns the documents matching `filter`, preserving their order.
    pub fn filter_documents(
        documents: impl IntoIterator<Item = &'a Document>,
        filter: &Filter,
    ) -> StoreResult<Vec<&'a Document>> {
        let mut patterns = PatternCache::default();
        let mut matched = Vec::new();

        for document in documents {
            if DocumentEvaluator::new(document, &mut patterns).evaluate(filter)? {
                matched.push(document);
            }
        }

        Ok(matched)
    }

    /// Returns the index of the first document matching `filter`.
    pub fn position(documents: &'a [Document], filter: &Filter) -> StoreResult<Option<usize>> {
        let mut patterns = PatternCache::default();

        for (index, document) in documents.iter().enumerate() {
            if DocumentEvaluator::new(document, &mut patterns).evaluate(filter)? {
                return Ok(Some(index));
            }
        }

        Ok(None)
    }
}

impl<'a, 'p> QueryVisitor for DocumentEvaluator<'a, 'p> {
    type Output = bool;
    type Error = StoreError;

    fn visit_all(&mut self) -> Result<Self::Output, Self::Error> {
        Ok(true)
    }

    fn visit_equals(&mut self, field: Field, value: &str) -> Result<Self::Output, Self::Error> {
        Ok(self.text(field) == Some(value))
    }

    fn visit_prefix(&mut self, field: Field, prefix: &str) -> Result<Self::Output, Self::Error> {
        Ok(
            self.text(field)
                .is_some_and(|text| text.starts_with(prefix))
        )
    }

    fn visit_matches(&mut self, field: Field, pattern: &str) -> Result<Self::Output, Self::Error> {
        // Compile even when the field is missing so a bad pattern always fails the query.
        let regex = self.patterns.get(pattern)?;

        Ok(
            match self.document.get(field.as_str()) {
                Some(Bson::String(text)) => regex.is_match(text),
                _ => false,
            }
        )
    }

    fn visit_id(&mut self, id: &RecordId) -> Result<Self::Output, Self::Error> {
        Ok(
            match self.document.get(ID_FIELD) {
                Some(Bson::ObjectId(oid)) => oid == id.as_object_id(),
                _ => false,
            }
        )
    }
}
