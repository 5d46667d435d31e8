use std::fmt;
use std::path::Path;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Password,
    /// Path to a local file
    File,
}

/// A single form input with browser-style validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    kind: InputKind,
    label: String,
    placeholder: String,
    value: String,
    required: bool,
}

impl InputField {
    pub fn new(kind: InputKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            placeholder: String::new(),
            value: String::new(),
            required: false,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn placeholder_text(&self) -> &str {
        &self.placeholder
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Check the value the way a browser would before submitting the form
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.is_empty() {
            if self.required {
                return Err(ClientError::Validation(format!(
                    "{} is required",
                    self.label
                )));
            }
            return Ok(());
        }

        match self.kind {
            InputKind::Email if !looks_like_email(self.value.trim()) => Err(
                ClientError::Validation(format!("'{}' is not a valid email address", self.value)),
            ),
            InputKind::File if !Path::new(&self.value).is_file() => Err(ClientError::Validation(
                format!("File not found: {}", self.value),
            )),
            _ => Ok(()),
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.value.is_empty() {
            format!("<{}>", self.placeholder)
        } else if self.kind == InputKind::Password {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        };
        write!(f, "{}: {}", self.label, shown)
    }
}
