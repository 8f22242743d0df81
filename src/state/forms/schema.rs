//! Declarative validation schemas
//!
//! A schema is an ordered list of fields, each with its ordered rules and an
//! optional normalizer applied when the request payload is built.

use super::form_state::{FieldErrors, FormState};
use super::rules::ValidationRule;
use serde::Serialize;
use std::collections::BTreeMap;

/// Transformation from raw field text to its submitted form
pub type Normalizer = fn(&str) -> String;

/// Rules attached to one field
#[derive(Debug)]
pub struct FieldRules {
    pub field: String,
    pub rules: Vec<Box<dyn ValidationRule>>,
    pub normalizer: Option<Normalizer>,
}

impl FieldRules {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            rules: Vec::new(),
            normalizer: None,
        }
    }

    pub fn rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn normalize_with(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    /// First failing rule's message, if any
    fn evaluate(&self, value: &str) -> Option<String> {
        self.rules.iter().find_map(|rule| rule.evaluate(value))
    }

    fn normalize(&self, value: &str) -> String {
        match self.normalizer {
            Some(normalize) => normalize(value),
            None => value.to_string(),
        }
    }
}

/// Request body built from a validated form: field name to normalized value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubmissionPayload(BTreeMap<String, String>);

/// Ordered per-field rules for one form
#[derive(Debug, Default)]
pub struct ValidationSchema {
    fields: Vec<FieldRules>,
}

impl ValidationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, rules: FieldRules) -> Self {
        self.fields.push(rules);
        self
    }

    /// Names of the fields covered by this schema, in declared order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.field.as_str())
    }

    /// Evaluate every field. Fields without an entry in the result are valid.
    pub fn validate(&self, form: &FormState) -> FieldErrors {
        self.fields
            .iter()
            .filter_map(|rules| {
                let value = form.value(&rules.field).unwrap_or_default();
                rules
                    .evaluate(value)
                    .map(|message| (rules.field.clone(), message))
            })
            .collect()
    }

    /// The first invalid field in declared order, with its message
    pub fn first_error(&self, form: &FormState) -> Option<(String, String)> {
        let mut errors = self.validate(form);
        self.field_names()
            .find_map(|name| errors.remove_entry(name))
    }

    /// Copy every field's value, normalized, into a request payload
    pub fn payload(&self, form: &FormState) -> SubmissionPayload {
        SubmissionPayload(
            self.fields
                .iter()
                .map(|rules| {
                    let value = form.value(&rules.field).unwrap_or_default();
                    (rules.field.clone(), rules.normalize(value))
                })
                .collect(),
        )
    }
}
