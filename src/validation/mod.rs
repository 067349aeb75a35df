//! Form validation module
//!
//! Declarative schemas for candidate records built by console forms.
//!
//! # Features
//!
//! - **Field Rules**: required, min length, pattern, email, URL, one-of, custom predicates
//! - **Normalization**: trimming, scalar-to-string coercion, defaults
//! - **Tagged Unions**: variant picked by a discriminator field
//! - **Path Validation**: check a single dotted path and only its ancestors
//!
//! Every failure is a [`ValidationFailure`] naming the field path and a
//! message key.

pub mod path;
mod rules;
mod schema;

pub use rules::{
    Predicate, Rule, EMAIL_ERROR, EMPTY_ERROR, OPTION_ERROR, TYPE_ERROR, UNKNOWN_PATH, URL_ERROR,
};
pub use schema::{ObjectSchema, Schema, StringSchema, UnionSchema};

use crate::error::ValidationFailure;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Typed records that validate through a shared schema
///
/// The record is serialized to JSON, checked, and the normalized value is
/// deserialized back.
pub trait Validate: Serialize + DeserializeOwned {
    /// Schema the record is checked against
    fn schema() -> &'static Schema;

    /// Validate the whole record, returning its normalized form
    fn validate(&self) -> Result<Self, ValidationFailure> {
        let candidate = to_candidate(self)?;
        let normalized = Self::schema().validate(&candidate)?;
        serde_json::from_value(normalized).map_err(|_| ValidationFailure::new("", TYPE_ERROR))
    }

    /// Validate a single dotted field path, returning the record with that field normalized
    fn validate_at(&self, field_path: &str) -> Result<Self, ValidationFailure> {
        let candidate = to_candidate(self)?;
        let normalized = Self::schema().validate_at(field_path, &candidate)?;
        serde_json::from_value(normalized).map_err(|_| ValidationFailure::new("", TYPE_ERROR))
    }

    /// Validate the whole record, collecting every failing field
    fn validate_all(&self) -> Result<Self, Vec<ValidationFailure>> {
        let candidate = to_candidate(self).map_err(|f| vec![f])?;
        let normalized = Self::schema().validate_all(&candidate)?;
        serde_json::from_value(normalized)
            .map_err(|_| vec![ValidationFailure::new("", TYPE_ERROR)])
    }
}

fn to_candidate<T: Serialize>(record: &T) -> Result<serde_json::Value, ValidationFailure> {
    serde_json::to_value(record).map_err(|_| ValidationFailure::new("", TYPE_ERROR))
}
