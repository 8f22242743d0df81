//! Form domain layer
//!
//! This module provides type-safe form handling for the login and address
//! screens:
//! - `field`: a single text input
//! - `form_state`: values, errors and the submission lock of one form
//! - `rules`: validation rules and postal-code normalization
//! - `schema`: ordered rules per field and payload construction
//! - `screens`: the concrete forms

mod field;
mod form_state;
mod rules;
mod schema;
mod screens;

pub use field::FormField;
pub use form_state::{FormState, SubmissionFlag};
pub use schema::{SubmissionPayload, ValidationSchema};
pub use screens::FormKind;
