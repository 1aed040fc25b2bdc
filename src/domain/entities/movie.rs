//! Movie entity and its people.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Entity;

/// A person credited on a movie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
}

impl Person {
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
        }
    }
}

fn default_language() -> String {
    "EN".to_string()
}

/// A movie in the catalogue.
///
/// `code` is the natural key and must be unique across the store. `id` may be
/// omitted on creation, in which case the store assigns one. Every field has a
/// deserialization default so an id-only body can identify a movie for deletion;
/// required fields are enforced by validation instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "title must not be empty"))]
    pub title: String,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 10.0, message = "rate must be between 0 and 10"))]
    pub rate: f64,

    #[serde(default = "default_language")]
    #[validate(length(min = 2, max = 8))]
    pub language: String,

    #[serde(default)]
    pub director: Person,

    #[serde(default)]
    pub cast: Vec<Person>,

    #[serde(default)]
    #[validate(length(min = 1, max = 64, message = "code must not be empty"))]
    pub code: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Movie {
    /// Creates a movie without an id or timestamps.
    pub fn new(
        title: impl Into<String>,
        rate: f64,
        language: impl Into<String>,
        director: Person,
        cast: Vec<Person>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            rate,
            language: language.into(),
            director,
            cast,
            code: code.into(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl Entity for Movie {
    const NAME: &'static str = "Movie";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
