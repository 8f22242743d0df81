//! Form field value objects

/// Character used to mask secret fields on screen
const SECRET_MASK: char = '•';

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    /// Whether the field has lost focus at least once
    pub touched: bool,
    /// Password-style entry, masked when rendered
    pub is_secret: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            touched: false,
            is_secret: false,
        }
    }

    /// Create a new masked text field
    pub fn secret(name: &str, label: &str) -> Self {
        Self {
            is_secret: true,
            ..Self::text(name, label)
        }
    }

    /// Get the text value
    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Replace the text value
    pub fn set_value(&mut self, value: String) {
        self.value = value;
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Record that the field lost focus
    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        if self.is_secret {
            std::iter::repeat(SECRET_MASK)
                .take(self.value.chars().count())
                .collect()
        } else {
            self.value.clone()
        }
    }
}
