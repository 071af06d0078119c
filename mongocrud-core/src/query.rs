//! Typed filters and updates for record stores.
//!
//! Filters and updates are a small closed set of variants that each backend
//! translates into its own query language through a [`QueryVisitor`].
//!
//! # Filters
//!
//! ```ignore
//! use mongocrud::query::Filter;
//! use mongocrud::record::Field;
//!
//! let everyone = Filter::All;
//! let johns = Filter::eq(Field::Name, "John");
//! let j_names = Filter::starts_with(Field::Name, "J");
//! let by_regex = Filter::matches(Field::Email, r"@example\.com$");
//! ```
//!
//! # Updates
//!
//! ```ignore
//! use mongocrud::query::Update;
//!
//! let rename = Update::set().name("Johnny");
//! ```

use crate::{
    error::StoreError,
    record::{Field, RecordId},
};

/// A filter selecting records in a collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    /// Matches every record.
    #[default]
    All,
    /// Field equals the value exactly.
    Equals {
        field: Field,
        value: String,
    },
    /// Field starts with the prefix, compared literally and case-sensitively.
    PrefixMatch {
        field: Field,
        prefix: String,
    },
    /// Field matches the regular expression.
    Matches {
        field: Field,
        pattern: String,
    },
    /// The record with this identifier.
    ById(RecordId),
}

impl Filter {
    /// Creates an equality filter.
    pub fn eq(field: Field, value: impl Into<String>) -> Self {
        Filter::Equals { field, value: value.into() }
    }

    /// Creates a literal prefix filter.
    pub fn starts_with(field: Field, prefix: impl Into<String>) -> Self {
        Filter::PrefixMatch { field, prefix: prefix.into() }
    }

    /// Creates a regular expression filter.
    ///
    /// The pattern is handed to the backend untouched; use [`Filter::starts_with`]
    /// for user supplied prefixes.
    pub fn matches(field: Field, pattern: impl Into<String>) -> Self {
        Filter::Matches { field, pattern: pattern.into() }
    }
}

/// A field-level update applied to a matching record.
///
/// Fields left as `None` are not touched; the identifier can never be updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    SetFields {
        name: Option<String>,
        email: Option<String>,
        age: Option<String>,
    },
}

impl Update {
    /// Starts an update that sets no fields yet.
    pub fn set() -> Self {
        Update::SetFields { name: None, email: None, age: None }
    }

    /// Sets the `name` field.
    pub fn name(self, value: impl Into<String>) -> Self {
        self.with(Field::Name, value)
    }

    /// Sets the `email` field.
    pub fn email(self, value: impl Into<String>) -> Self {
        self.with(Field::Email, value)
    }

    /// Sets the `age` field.
    pub fn age(self, value: impl Into<String>) -> Self {
        self.with(Field::Age, value)
    }

    /// Sets the given field.
    pub fn with(self, field: Field, value: impl Into<String>) -> Self {
        let Update::SetFields { mut name, mut email, mut age } = self;
        let value = Some(value.into());

        match field {
            Field::Name => name = value,
            Field::Email => email = value,
            Field::Age => age = value,
        }

        Update::SetFields { name, email, age }
    }

    /// Returns the assignments in field order, skipping unset fields.
    pub fn assignments(&self) -> Vec<(Field, &str)> {
        let Update::SetFields { name, email, age } = self;

        [(Field::Name, name), (Field::Email, email), (Field::Age, age)]
            .into_iter()
            .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
            .collect()
    }

    /// Returns true when the update would not set any field.
    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }
}

/// Visitor over [`Filter`] variants, implemented by each backend.
pub trait QueryVisitor {
    type Output;
    type Error: Into<StoreError>;

    fn visit_all(&mut self) -> Result<Self::Output, Self::Error>;
    fn visit_equals(&mut self, field: Field, value: &str) -> Result<Self::Output, Self::Error>;
    fn visit_prefix(&mut self, field: Field, prefix: &str) -> Result<Self::Output, Self::Error>;
    fn visit_matches(&mut self, field: Field, pattern: &str) -> Result<Self::Output, Self::Error>;
    fn visit_id(&mut self, id: &RecordId) -> Result<Self::Output, Self::Error>;

    fn visit_filter(&mut self, filter: &Filter) -> Result<Self::Output, Self::Error> {
        match filter {
            Filter::All => self.visit_all(),
            Filter::Equals { field, value } => self.visit_equals(*field, value),
            Filter::PrefixMatch { field, prefix } => self.visit_prefix(*field, prefix),
            Filter::Matches { field, pattern } => self.visit_matches(*field, pattern),
            Filter::ById(id) => self.visit_id(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_builder_sets_only_named_fields() {
        let update = Update::set().name("Johnny").age("39");

        assert_eq!(
            update.assignments(),
            vec![(Field::Name, "Johnny"), (Field::Age, "39")]
        );
        assert!(!update.is_empty());
        assert!(Update::set().is_empty());
    }

    #[test]
    fn later_assignments_win() {
        let update = Update::set().email("a@example.com").email("b@example.com");

        assert_eq!(update.assignments(), vec![(Field::Email, "b@example.com")]);
    }

    #[test]
    fn default_filter_matches_everything() {
        assert_eq!(Filter::default(), Filter::All);
    }
}
