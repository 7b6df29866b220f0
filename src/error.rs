//! Error taxonomy for configuration and time parsing

use thiserror::Error;

/// Errors surfaced when a component is configured with values it cannot use.
///
/// Every variant is a configuration error: nothing here is retried or
/// recovered, the caller is expected to fix its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Text that does not parse as a time in the expected representation
    #[error("invalid time `{input}`, expected `{expected}`")]
    InvalidTimeFormat {
        input: String,
        expected: &'static str,
    },

    /// Interval of zero, inverted range, or similar unusable setting
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl Error {
    pub(crate) fn invalid_time(input: impl Into<String>, expected: &'static str) -> Self {
        Error::InvalidTimeFormat {
            input: input.into(),
            expected,
        }
    }
}

/// Result alias for configuration-level operations
pub type Result<T, E = Error> = std::result::Result<T, E>;
