use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The failures collected while validating one request.
///
/// Fields are kept in the order their first failure was recorded.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("request failed validation on {} field(s)", .fields.len())]
pub struct ValidationErrors {
    fields: IndexMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Record a failure message against a field.
    pub fn record(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Whether no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The number of fields with at least one failure.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The failure messages recorded against a field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Iterate over every recorded failure, field by field.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().flat_map(|(field, messages)| {
            messages
                .iter()
                .map(move |message| (field.as_str(), message.as_str()))
        })
    }
}

/// A single field failure as reported to the caller.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(inline))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// The name of the offending field
    pub field: String,
    /// Why the field was rejected
    pub message: String,
}

/// The body of a `400 Bad Request` produced by validation.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(inline))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Every field failure, in the order it was recorded
    pub errors: Vec<FieldError>,
}

impl From<ValidationErrors> for ValidationReport {
    fn from(errors: ValidationErrors) -> Self {
        let errors = errors
            .iter()
            .map(|(field, message)| FieldError {
                field: field.to_owned(),
                message: message.to_owned(),
            })
            .collect();
        Self { errors }
    }
}
