//! Transient user notifications.
//!
//! Every action resolves to exactly one [`Notice`] — a short,
//! non-blocking message the presentation layer shows as a toast or
//! status line. Notices carry the most specific message available:
//! the service's own reason string when it provided one, a generic
//! action-specific message otherwise.

use std::fmt;

/// How a notice should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// A confirmed operation.
    Success,
    /// A locally rejected request the user can correct (missing field).
    Warning,
    /// A failed or rejected operation.
    Error,
}

/// A short transient message for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Presentation severity.
    pub severity: Severity,
    /// The message text.
    pub message: String,
}

impl Notice {
    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    /// A warning notice.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_severity() {
        assert_eq!(Notice::success("ok").severity, Severity::Success);
        assert_eq!(Notice::warning("hm").severity, Severity::Warning);
        assert_eq!(Notice::error("no").severity, Severity::Error);
        assert_eq!(Notice::error("no").to_string(), "no");
    }
}
