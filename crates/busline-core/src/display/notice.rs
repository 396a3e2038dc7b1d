//! User-facing notices.

use std::fmt;

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Success => "Success:",
            Severity::Error => "Error:",
            Severity::Warning => "Warning:",
            Severity::Info => "Info:",
        }
    }
}

/// A one-line message for the user about the outcome of an action.
///
/// # Examples
///
/// ```rust
/// use busline_core::display::{Notice, Severity};
///
/// let notice = Notice::success("Booking cancelled successfully");
/// assert_eq!(notice.severity, Severity::Success);
/// assert_eq!(notice.to_string(), "Success: Booking cancelled successfully\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.severity.label(), self.message)
    }
}
