//! Field validation rules
//!
//! Each rule evaluates a raw field value and yields the message to show when
//! the value is rejected. Rules for a field run in declared order and the
//! first failure wins, so every rule except `Required` accepts empty input.

use regex::Regex;
use std::sync::LazyLock;

/// Digits in a Brazilian postal code (CEP)
pub const CEP_DIGITS: usize = 8;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid hardcoded regex")
});

/// Plain digits, or a CEP written with its usual mask (`01310-100`, `01.310-100`)
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+|[0-9]{2}\.?[0-9]{3}-[0-9]{3})$").expect("valid hardcoded regex")
});

/// Capability shared by every rule
pub trait ValidationRule: std::fmt::Debug + Send + Sync {
    /// `Some(message)` when the value is rejected
    fn evaluate(&self, value: &str) -> Option<String>;
}

/// Rejects empty or whitespace-only input
#[derive(Debug, Clone)]
pub struct Required {
    pub message: String,
}

impl Required {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl ValidationRule for Required {
    fn evaluate(&self, value: &str) -> Option<String> {
        value.trim().is_empty().then(|| self.message.clone())
    }
}

/// Rejects values that are not shaped like `local@domain.tld`
#[derive(Debug, Clone)]
pub struct EmailFormat {
    pub message: String,
}

impl EmailFormat {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl ValidationRule for EmailFormat {
    fn evaluate(&self, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() || EMAIL_RE.is_match(value) {
            None
        } else {
            Some(self.message.clone())
        }
    }
}

/// Rejects values that are not a digit string. Separators are accepted only
/// where the CEP mask puts them.
#[derive(Debug, Clone)]
pub struct Numeric {
    pub message: String,
}

impl Numeric {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl ValidationRule for Numeric {
    fn evaluate(&self, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() || NUMBER_RE.is_match(value) {
            None
        } else {
            Some(self.message.clone())
        }
    }
}

/// Rejects values whose normalized digit string is not exactly `len` long.
///
/// Normalization pads short inputs, so only inputs carrying more than `len`
/// digits fail.
#[derive(Debug, Clone)]
pub struct ExactDigitLength {
    pub len: usize,
    pub message: String,
}

impl ExactDigitLength {
    pub fn new(len: usize, message: &str) -> Self {
        Self {
            len,
            message: message.to_string(),
        }
    }
}

impl ValidationRule for ExactDigitLength {
    fn evaluate(&self, value: &str) -> Option<String> {
        if value.trim().is_empty() {
            return None;
        }
        let normalized = pad_digits(value, self.len);
        (normalized.chars().count() != self.len).then(|| self.message.clone())
    }
}

/// Keep only the ASCII digits of `raw` and left-pad with `'0'` up to `width`
fn pad_digits(raw: &str, width: usize) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    format!("{digits:0>width$}")
}

/// Canonical CEP: digits only, left-padded with zeros to eight characters
pub fn normalize_cep(raw: &str) -> String {
    pad_digits(raw, CEP_DIGITS)
}
