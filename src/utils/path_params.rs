//! Path parameter extraction for requests that arrive without a gateway in front.

use serde_json::{Map, Value};

/// Literal path segment that selects natural-key lookup instead of an id.
const FIND_ONE_SEGMENT: &str = "findOne";

/// Resource template and path parameters derived from a concrete path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    pub resource: String,
    pub parameters: Map<String, Value>,
}

/// Splits a `/<collection>/<id>` path into a `/<collection>/{id}` resource and
/// an `id` parameter.
///
/// The id is stored as a JSON integer when it parses as one and as a string
/// otherwise, so the controller can reject non-integer ids. Any other shape is
/// returned unchanged with no parameters.
///
/// # Examples
///
/// ```ignore
/// let shape = extract_path_parameters("/movies/7");
/// assert_eq!(shape.resource, "/movies/{id}");
/// assert_eq!(shape.parameters["id"], 7);
/// ```
pub fn extract_path_parameters(path: &str) -> PathShape {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [collection, id] if !id.eq_ignore_ascii_case(FIND_ONE_SEGMENT) => {
            let value = id
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::from(*id));

            let mut parameters = Map::new();
            parameters.insert("id".to_string(), value);

            PathShape {
                resource: format!("/{collection}/{{id}}"),
                parameters,
            }
        }
        _ => PathShape {
            resource: path.to_string(),
            parameters: Map::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_id() {
        let shape = extract_path_parameters("/movies/7");
        assert_eq!(shape.resource, "/movies/{id}");
        assert_eq!(shape.parameters["id"], json!(7));
    }

    #[test]
    fn test_non_numeric_id_kept_as_string() {
        let shape = extract_path_parameters("/movies/seven");
        assert_eq!(shape.parameters["id"], json!("seven"));
    }

    #[test]
    fn test_collection_has_no_parameters() {
        let shape = extract_path_parameters("/movies");
        assert_eq!(shape.resource, "/movies");
        assert!(shape.parameters.is_empty());
    }

    #[test]
    fn test_find_one_is_not_an_id() {
        let shape = extract_path_parameters("/movies/findOne");
        assert_eq!(shape.resource, "/movies/findOne");
        assert!(shape.parameters.is_empty());
    }

    #[test]
    fn test_deep_path_unchanged() {
        let shape = extract_path_parameters("/a/b/c");
        assert_eq!(shape.resource, "/a/b/c");
        assert!(shape.parameters.is_empty());
    }

    #[test]
    fn test_root_path() {
        let shape = extract_path_parameters("/");
        assert_eq!(shape.resource, "/");
        assert!(shape.parameters.is_empty());
    }
}
