//! Result value handed from handlers back to the transport boundary.

use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

/// Output of a dispatched handler.
///
/// [`Reply::Empty`] maps to `204 No Content`; anything else to `200 OK`.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Empty,
    Json(Value),
}

impl Reply {
    /// Serializes `value` into a JSON reply.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if serialization fails.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, AppError> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// The JSON body to send, `None` when the reply carries no content.
    /// A JSON `null` counts as no content.
    pub fn into_body(self) -> Option<Value> {
        match self {
            Self::Json(value) if !value.is_null() => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_replies() {
        assert_eq!(Reply::Empty.into_body(), None);
        assert_eq!(Reply::Json(Value::Null).into_body(), None);
        assert_eq!(Reply::Json(json!({})).into_body(), Some(json!({})));
    }

    #[test]
    fn test_json_reply() {
        let reply = Reply::json(&vec![1, 2]).unwrap();
        assert_eq!(reply, Reply::Json(json!([1, 2])));
    }
}
