//! Conjunctive field=value matching over plain records.
//!
//! Records are JSON objects, the same shape entities take on disk. Criteria
//! are keyed by a per-entity field enum so that only searchable fields can be
//! queried; string field names are parsed into that enum up front.

use serde_json::{Map, Value};
use thiserror::Error;

/// A plain key/value record
pub type Record = Map<String, Value>;

/// A field that can appear in search criteria
pub trait SearchField: Copy + std::fmt::Debug {
    /// Key of this field in the entity's record
    fn key(&self) -> &'static str;
}

/// A field name that is not searchable for the entity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown search field '{field}' (expected one of: {expected})")]
pub struct UnknownField {
    pub field: String,
    pub expected: &'static str,
}

/// A set of field=value constraints, all of which must hold
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria<F> {
    entries: Vec<(F, Value)>,
}

impl<F> Default for Criteria<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: SearchField> Criteria<F> {
    /// Create an empty criteria set (matches every record)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint
    pub fn with(mut self, field: F, value: impl Into<Value>) -> Self {
        self.push(field, value);
        self
    }

    /// Add a constraint in place
    pub fn push(&mut self, field: F, value: impl Into<Value>) {
        self.entries.push((field, value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a record satisfies every constraint
    pub fn matches(&self, record: &Record) -> bool {
        self.entries
            .iter()
            .all(|(field, expected)| match record.get(field.key()) {
                Some(actual) => values_match(actual, expected),
                None => false,
            })
    }
}

/// Strings compare case-insensitively; everything else must be equal.
fn values_match(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::String(a), Value::String(e)) => a.to_lowercase() == e.to_lowercase(),
        _ => actual == expected,
    }
}

/// Return the records matching all criteria, in input order.
pub fn search_items<'a, F, I>(records: I, criteria: &Criteria<F>) -> Vec<&'a Record>
where
    F: SearchField,
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|record| criteria.matches(record))
        .collect()
}
