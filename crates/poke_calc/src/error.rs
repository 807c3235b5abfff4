//! Error type shared by every fallible calculation.
//!
//! Only configuration problems are errors. Observations that no IV can explain
//! are reported as empty ranges, since noisy stat histories are routine.

/// Errors raised before any arithmetic runs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    /// A mandatory input was not supplied.
    #[error("{field} parameter is required")]
    MissingField { field: &'static str },

    /// A supplied input is outside its documented domain.
    #[error("{field} is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    /// An enum tag that no formula handles.
    #[error("unsupported {kind}: {value}")]
    Unsupported { kind: &'static str, value: String },

    /// The multi-hit enumeration would exceed its cost ceiling.
    #[error("{hits} hits requested, at most {max} can be enumerated")]
    TooManyHits { hits: usize, max: usize },

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CalcError {
    pub(crate) const fn missing(field: &'static str) -> Self {
        CalcError::MissingField { field }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(kind: &'static str, value: impl Into<String>) -> Self {
        CalcError::Unsupported {
            kind,
            value: value.into(),
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::Config(err.to_string())
    }
}

/// Result alias used across the crate.
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        assert_eq!(
            CalcError::missing("level").to_string(),
            "level parameter is required"
        );
        assert_eq!(
            CalcError::unsupported("growth rate", "glacial").to_string(),
            "unsupported growth rate: glacial"
        );
        assert_eq!(
            CalcError::TooManyHits { hits: 7, max: 5 }.to_string(),
            "7 hits requested, at most 5 can be enumerated"
        );
    }
}
