use serde_json::{Map, Value};

mod errors;
pub mod fields;
pub mod rules;

pub use errors::{FieldError, ValidationErrors, ValidationReport};

/// Where a validated field is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A named parameter of the matched path pattern
    Path,
    /// A top-level member of the JSON request body
    Body,
}

/// A predicate over a single field value paired with its failure message.
///
/// The predicate receives `None` when the field is absent from its source.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Returns `true` when the value is acceptable
    pub check: fn(Option<&Value>) -> bool,
    /// Recorded against the field when `check` fails
    pub message: &'static str,
}

impl Rule {
    /// Pair a predicate with its failure message.
    pub const fn new(check: fn(Option<&Value>) -> bool, message: &'static str) -> Self {
        Self { check, message }
    }
}

/// An ordered chain of rules bound to one named request field.
///
/// Rules run in declaration order and the chain stops at the first failure,
/// so a field reports at most one message.
#[derive(Debug, Clone, Copy)]
pub struct FieldValidator {
    /// The name of the field within its source
    pub field: &'static str,
    /// Whether the field is a path parameter or a body member
    pub source: Source,
    /// The rules applied to the field, in order
    pub rules: &'static [Rule],
}

impl FieldValidator {
    /// A validator for a path parameter.
    pub const fn path(field: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            field,
            source: Source::Path,
            rules,
        }
    }

    /// A validator for a member of the JSON body.
    pub const fn body(field: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            field,
            source: Source::Body,
            rules,
        }
    }

    /// Run the rule chain against the request, returning the first failure message.
    pub fn check(&self, input: &RequestInput) -> Option<&'static str> {
        let value = input.field(self.source, self.field);
        self.rules
            .iter()
            .find(|rule| !(rule.check)(value))
            .map(|rule| rule.message)
    }
}

/// The raw, unvalidated shape of a request: its path parameters and JSON body.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    path: Map<String, Value>,
    body: Value,
}

impl RequestInput {
    /// Build the input from extracted path parameters and a parsed body.
    ///
    /// Path parameters are kept as JSON strings, exactly as they appeared in the URL.
    pub fn new<'a>(path: impl IntoIterator<Item = (&'a str, &'a str)>, body: Value) -> Self {
        let path = path
            .into_iter()
            .map(|(name, value)| (name.to_owned(), Value::String(value.to_owned())))
            .collect();
        Self { path, body }
    }

    /// Build the input for a request without path parameters.
    pub fn from_body(body: Value) -> Self {
        Self {
            path: Map::new(),
            body,
        }
    }

    /// The request body, exactly as it was validated.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Look up a field in the given source.
    ///
    /// A body that is not a JSON object has no fields.
    pub fn field(&self, source: Source, name: &str) -> Option<&Value> {
        match source {
            Source::Path => self.path.get(name),
            Source::Body => self.body.as_object().and_then(|body| body.get(name)),
        }
    }
}

/// Run every validator against the request and collect their failures.
///
/// Each validator contributes at most one error, and a failing validator
/// never prevents the ones after it from running.
pub fn validate(validators: &[FieldValidator], input: &RequestInput) -> ValidationErrors {
    validators
        .iter()
        .fold(ValidationErrors::default(), |mut errors, validator| {
            if let Some(message) = validator.check(input) {
                errors.record(validator.field, message);
            }
            errors
        })
}
