//! Numeric form-field parsing.
//!
//! Transform and property fields accept either a plain number or a small
//! arithmetic expression (`2*1.5`, `(6 + 2) / 2`).

use evalexpr::Value;

/// Why a numeric field could not be read
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// Field is empty or whitespace
    Empty,
    /// Expression failed to parse or evaluate
    Evaluation(String),
    /// Expression produced a non-numeric value
    InvalidType(String),
    /// Result is NaN or infinite
    NonFinite,
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Empty => write!(f, "Empty input"),
            InputError::Evaluation(msg) => write!(f, "Evaluation error: {}", msg),
            InputError::InvalidType(msg) => write!(f, "Invalid type: {}", msg),
            InputError::NonFinite => write!(f, "Value is not a finite number"),
        }
    }
}

impl std::error::Error for InputError {}

/// Parse a numeric field value
pub fn parse_numeric_input(input: &str) -> Result<f64, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let value = match trimmed.parse::<f64>() {
        Ok(v) => v,
        Err(_) => match evalexpr::eval(trimmed)
            .map_err(|e| InputError::Evaluation(e.to_string()))?
        {
            Value::Float(f) => f,
            Value::Int(i) => i as f64,
            other => {
                return Err(InputError::InvalidType(format!(
                    "Expected number, got {:?}",
                    other
                )))
            }
        },
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NonFinite)
    }
}
