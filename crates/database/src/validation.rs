//! Input validation for entity fields.
//!
//! Checks are limited to required-field presence and closed value sets;
//! anything else is accepted as entered.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty value where one is required.
    Empty(String),
    /// Value outside a closed set.
    InvalidValue { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
            ValidationError::InvalidValue { field, value } => {
                write!(f, "'{}' is not a valid {}", value, field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Require a non-blank value.
pub fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field.to_string()));
    }
    Ok(())
}

/// Require several values at once; all missing fields are named in one error.
pub fn require_all(fields: &[(&str, &str)]) -> Result<(), ValidationError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Empty(missing.join(" and ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert!(require("name", "Bot1").is_ok());
        assert!(matches!(require("name", ""), Err(ValidationError::Empty(_))));
        assert!(matches!(require("name", "   "), Err(ValidationError::Empty(_))));
    }

    #[test]
    fn test_require_all_names_every_missing_field() {
        assert!(require_all(&[("name", "x"), ("prompt", "y")]).is_ok());

        let err = require_all(&[("name", ""), ("prompt", " ")]).unwrap_err();
        assert_eq!(err, ValidationError::Empty("name and prompt".to_string()));
        assert_eq!(err.to_string(), "name and prompt cannot be empty");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::InvalidValue {
            field: "position",
            value: "top".to_string(),
        };
        assert_eq!(err.to_string(), "'top' is not a valid position");
    }
}
