use core::fmt;

/// A value carried by an audit log line: free-form text or a count.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogValue {
    Text(String),
    Count(usize),
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<usize> for LogValue {
    fn from(n: usize) -> Self {
        Self::Count(n)
    }
}

/// One line of a fairness audit log.
///
/// A log is an append-only sequence of these entries, built in a single pass
/// by [`FairnessEngine::build_log`] and immutable once returned. `Checked`
/// lines carry a verdict flag alongside the value (fairness measurements and
/// engine guarantees); `Separator` marks section boundaries.
///
/// [`FairnessEngine::build_log`]: crate::FairnessEngine::build_log
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEntry {
    Value { label: String, value: LogValue },
    Checked { label: String, value: LogValue, ok: bool },
    Separator,
}

impl LogEntry {
    pub fn value(label: impl Into<String>, value: impl Into<LogValue>) -> Self {
        Self::Value {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn checked(label: impl Into<String>, value: impl Into<LogValue>, ok: bool) -> Self {
        Self::Checked {
            label: label.into(),
            value: value.into(),
            ok,
        }
    }

    /// Returns the label, or `None` for separators.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Value { label, .. } | Self::Checked { label, .. } => Some(label),
            Self::Separator => None,
        }
    }
}
