use std::fmt;

/// A push button that swaps to a busy label while its action runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    label: String,
    busy_label: Option<String>,
    disabled: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            busy_label: None,
            disabled: false,
        }
    }

    /// Label shown while the button is disabled, e.g. "Saving..."
    pub fn busy_label(mut self, label: impl Into<String>) -> Self {
        self.busy_label = Some(label.into());
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// A disabled button is reported busy to assistive output
    pub fn is_busy(&self) -> bool {
        self.disabled
    }

    pub fn label(&self) -> &str {
        match (&self.busy_label, self.disabled) {
            (Some(busy), true) => busy,
            _ => &self.label,
        }
    }

    /// Whether a click should run the action
    pub fn can_activate(&self) -> bool {
        !self.disabled
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.disabled {
            write!(f, "( {} )", self.label())
        } else {
            write!(f, "[ {} ]", self.label())
        }
    }
}
