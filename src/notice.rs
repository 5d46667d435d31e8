use std::fmt;

/// What a page shows the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Blocking alert, the page's only feedback for the action
    Alert(String),
    /// Inline status line rendered on the page
    Info(String),
    /// Inline error line rendered on the page
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Alert(text) | Notice::Info(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Alert(text) => write!(f, "[!] {}", text),
            Notice::Info(text) => write!(f, "{}", text),
            Notice::Error(text) => write!(f, "error: {}", text),
        }
    }
}
