//! Typed access to loosely typed request parameters.

use crate::error::AppError;
use serde_json::Value;

/// Parses an integer from a JSON integer or a string holding one.
///
/// Anything else (floats, booleans, objects, non-numeric strings) is rejected
/// with an [`AppError::InvalidArgument`] naming `field`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(any_to_int(&json!("12"), "page").unwrap(), 12);
/// assert_eq!(any_to_int(&json!(12), "page").unwrap(), 12);
/// assert!(any_to_int(&json!("twelve"), "page").is_err());
/// ```
pub fn any_to_int(value: &Value, field: &str) -> Result<i64, AppError> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    };

    parsed.ok_or_else(|| AppError::invalid_argument(field, format!("{field} must be a number")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_string() {
        assert_eq!(any_to_int(&json!("42"), "page").unwrap(), 42);
        assert_eq!(any_to_int(&json!("-3"), "page").unwrap(), -3);
    }

    #[test]
    fn test_parses_integer() {
        assert_eq!(any_to_int(&json!(7), "size").unwrap(), 7);
    }

    #[test]
    fn test_rejects_non_numeric_string() {
        let err = any_to_int(&json!("abc"), "size").unwrap_err();
        match err {
            AppError::InvalidArgument { field, message } => {
                assert_eq!(field, "size");
                assert_eq!(message, "size must be a number");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_float_and_bool() {
        assert!(any_to_int(&json!(1.5), "page").is_err());
        assert!(any_to_int(&json!(true), "page").is_err());
        assert!(any_to_int(&json!(null), "page").is_err());
    }
}
