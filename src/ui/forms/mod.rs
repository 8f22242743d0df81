//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `form_view`: login and address forms

mod field_renderer;
mod form_view;

pub use form_view::draw;
