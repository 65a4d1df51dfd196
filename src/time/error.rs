//! Time parsing error types.

use thiserror::Error;

/// Errors returned when a `MM:SS` or `HH:MM:SS` string cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// A component is not a base-10 integer.
    #[error("invalid time format '{0}': expected MM:SS or HH:MM:SS")]
    InvalidFormat(String),

    /// The input did not split into two or three components.
    #[error("invalid time format '{input}': expected 2 or 3 components, found {found}")]
    WrongArity { input: String, found: usize },

    /// A component was negative.
    #[error("invalid time format '{0}': components must not be negative")]
    NegativeComponent(String),

    /// A component exceeded its unit's limit.
    #[error("{unit} out of range: {value} (must be less than {limit})")]
    OutOfRange {
        unit: &'static str,
        value: u64,
        limit: u64,
    },

    /// The total does not fit in a duration.
    #[error("time '{0}' is too large")]
    Overflow(String),
}

impl TimeParseError {
    /// Returns true if the input was structurally malformed.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat(_) | Self::WrongArity { .. } | Self::NegativeComponent(_)
        )
    }

    /// Returns true if the input was well formed but a value was too large.
    #[must_use]
    pub fn is_range_error(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::Overflow(_))
    }
}
