//! Form state management
//!
//! A `FormState` owns the ordered fields of one screen, the errors produced by
//! the last validation pass and the submission lock. While the lock is held
//! every control is treated as disabled: edits, focus moves and touches are
//! rejected.

use super::field::FormField;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Field name to error message, as produced by a validation pass
pub type FieldErrors = BTreeMap<String, String>;

/// Errors returned when mutating a form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("form is locked while a submission is in progress")]
    Locked,
}

/// Handle on a form's submission lock.
///
/// Every handle taken from the same form sees the same flag, so the lock
/// stays observable while the form is borrowed by an in-flight request.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFlag(Arc<AtomicBool>);

impl SubmissionFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Release the lock. Calling it while released is a no-op.
    pub fn end_submission(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Live state of one form instance
#[derive(Debug, Default)]
pub struct FormState {
    fields: Vec<FormField>,
    errors: FieldErrors,
    submission_in_progress: SubmissionFlag,
    active_field_index: usize,
}

impl FormState {
    /// Create a form from its declared fields. Values start empty.
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            ..Default::default()
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn field_mut(&mut self, name: &str) -> Result<&mut FormField, FormError> {
        self.fields
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    fn ensure_unlocked(&self) -> Result<(), FormError> {
        if self.is_submitting() {
            Err(FormError::Locked)
        } else {
            Ok(())
        }
    }

    /// Current value of a declared field
    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name).map(FormField::as_text)
    }

    /// All `(name, value)` pairs in declared order
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.as_text()))
    }

    /// Replace the value of a declared field
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.ensure_unlocked()?;
        self.field_mut(name)?.set_value(value.into());
        Ok(())
    }

    /// Mark a field as having lost focus at least once
    pub fn set_field_touched(&mut self, name: &str) -> Result<(), FormError> {
        self.ensure_unlocked()?;
        self.field_mut(name)?.mark_touched();
        Ok(())
    }

    /// Mark every field touched, as happens on a submit attempt
    pub fn touch_all(&mut self) {
        for field in &mut self.fields {
            field.mark_touched();
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submission_in_progress.is_set()
    }

    pub fn submission_flag(&self) -> SubmissionFlag {
        self.submission_in_progress.clone()
    }

    /// Take the submission lock and return the handle that releases it.
    /// Calling it again while held is a no-op.
    pub fn begin_submission(&mut self) -> SubmissionFlag {
        self.submission_in_progress.set();
        self.submission_flag()
    }

    /// Replace the error map with the result of a validation pass
    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Raw error for a field, regardless of whether it has been touched
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Error to display next to a field: only for touched fields with a
    /// non-empty message
    pub fn visible_error(&self, name: &str) -> Option<&str> {
        let touched = self.field(name).is_some_and(|f| f.touched);
        self.error(name).filter(|msg| touched && !msg.is_empty())
    }

    pub fn active_field(&self) -> usize {
        self.active_field_index
    }

    pub fn active_field_name(&self) -> Option<&str> {
        self.fields
            .get(self.active_field_index)
            .map(|f| f.name.as_str())
    }

    /// Move focus forward, blurring the current field
    pub fn next_field(&mut self) {
        let count = self.fields.len();
        if count == 0 || self.is_submitting() {
            return;
        }
        self.blur_active();
        self.active_field_index = (self.active_field_index + 1) % count;
    }

    /// Move focus backward, blurring the current field
    pub fn prev_field(&mut self) {
        let count = self.fields.len();
        if count == 0 || self.is_submitting() {
            return;
        }
        self.blur_active();
        self.active_field_index = if self.active_field_index == 0 {
            count - 1
        } else {
            self.active_field_index - 1
        };
    }

    fn blur_active(&mut self) {
        if let Some(name) = self.active_field_name().map(str::to_string) {
            // Focus moves are refused while locked, so this cannot fail
            let _ = self.set_field_touched(&name);
        }
    }

    /// Type a character into the focused field
    pub fn input_char(&mut self, c: char) {
        if self.is_submitting() {
            return;
        }
        if let Some(field) = self.fields.get_mut(self.active_field_index) {
            field.push_char(c);
        }
    }

    /// Delete the last character of the focused field
    pub fn backspace(&mut self) {
        if self.is_submitting() {
            return;
        }
        if let Some(field) = self.fields.get_mut(self.active_field_index) {
            field.pop_char();
        }
    }

    /// Append pasted text to the focused field. Control characters such as
    /// line breaks are dropped.
    pub fn paste(&mut self, text: &str) -> Result<(), FormError> {
        let Some(field) = self.fields.get(self.active_field_index) else {
            return Ok(());
        };
        let name = field.name.clone();
        let mut value = field.as_text().to_string();
        value.extend(text.chars().filter(|c| !c.is_control()));
        self.set_field(&name, value)
    }
}
