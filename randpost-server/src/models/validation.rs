//! Request body validation errors

use std::fmt;

/// Why a creation request body was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyError {
    /// Body is not JSON, or is JSON but not an object
    MalformedRequestBody { reason: String },

    /// Object lacks the field, or it has the wrong type
    MissingOrInvalidField { field: &'static str },
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRequestBody { reason } => {
                write!(f, "request body must be a JSON object: {}", reason)
            }
            Self::MissingOrInvalidField { field } => {
                write!(f, "{} must be present and a string", field)
            }
        }
    }
}

impl std::error::Error for BodyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = BodyError::MissingOrInvalidField { field: "content" };
        assert_eq!(err.to_string(), "content must be present and a string");

        let err = BodyError::MalformedRequestBody {
            reason: "expected value at line 1 column 1".into(),
        };
        assert!(err.to_string().starts_with("request body must be a JSON object"));
    }
}
