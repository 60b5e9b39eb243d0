//! Field validator that accumulates violations
//!
//! A [`Validator`] is created fresh for each request, populated by any number
//! of checks, and read once to decide whether the input is usable. Only the
//! first message recorded for a field is kept.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

/// Accumulator of per-field violation messages
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    /// Create an empty validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no violations have been recorded
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Field to message mapping recorded so far
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Consume the validator and return its field to message mapping
    pub fn into_errors(self) -> BTreeMap<String, String> {
        self.errors
    }

    /// Record `message` under `field` unless the field already has one
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_insert_with(|| message.into());
    }

    /// Record `message` under `field` if `ok` is false
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }
}

/// Returns true if every element of `values` is distinct
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|value| seen.insert(value))
}
