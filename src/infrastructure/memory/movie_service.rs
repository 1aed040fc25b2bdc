//! In-memory movie store.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value, json};
use tokio::sync::RwLock;

use crate::domain::entities::{Entity, Movie};
use crate::domain::page::{Page, Pagination};
use crate::domain::services::CrudService;
use crate::domain::user::User;
use crate::error::AppError;

/// Filter keys applied as exact, case-sensitive equality.
const FILTER_KEYS: [&str; 3] = ["code", "language", "title"];

/// Movie store kept in insertion order behind a read/write lock.
///
/// Ids are assigned as `max + 1`, starting at 1. `code` is unique.
#[derive(Debug, Default)]
pub struct MovieService {
    movies: RwLock<Vec<Movie>>,
}

impl MovieService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `movies` as given, without id assignment.
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies: RwLock::new(movies),
        }
    }
}

fn filter_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn field<'a>(movie: &'a Movie, key: &str) -> &'a str {
    match key {
        "code" => &movie.code,
        "language" => &movie.language,
        _ => &movie.title,
    }
}

fn matches(movie: &Movie, filters: &Map<String, Value>) -> bool {
    FILTER_KEYS.iter().all(|key| {
        match filters.get(*key).and_then(filter_value) {
            Some(expected) => field(movie, key) == expected,
            None => true,
        }
    })
}

fn id_details(id: i64) -> Value {
    json!({ "id": id })
}

#[async_trait]
impl CrudService<Movie, User> for MovieService {
    async fn create(&self, _user: &User, mut element: Movie) -> Result<Movie, AppError> {
        let mut movies = self.movies.write().await;

        if movies.iter().any(|m| m.code == element.code) {
            return Err(AppError::already_exists(
                Movie::NAME,
                json!({ "code": element.code }),
            ));
        }

        let id = match element.id {
            Some(id) if movies.iter().any(|m| m.id == Some(id)) => {
                return Err(AppError::already_exists(Movie::NAME, id_details(id)));
            }
            Some(id) => id,
            None => movies
                .iter()
                .filter_map(|m| m.id)
                .max()
                .unwrap_or(0)
                .checked_add(1)
                .ok_or_else(|| AppError::invalid_argument("id", "No id left to assign"))?,
        };

        let now = Utc::now();
        element.id = Some(id);
        element.created_at = Some(now);
        element.updated_at = Some(now);

        movies.push(element.clone());
        tracing::debug!(id, code = %element.code, "Movie created");

        Ok(element)
    }

    async fn find_all(
        &self,
        _user: &User,
        filters: &Map<String, Value>,
        pagination: Pagination,
    ) -> Result<Page<Movie>, AppError> {
        let movies = self.movies.read().await;

        let matching: Vec<&Movie> = movies.iter().filter(|m| matches(m, filters)).collect();
        let count = matching.len();
        let offset = pagination.offset();
        let end = offset.saturating_add(pagination.size).min(count);

        let content = if offset < count {
            matching[offset..end].iter().map(|m| (*m).clone()).collect()
        } else {
            Vec::new()
        };

        Ok(Page::new(filters, pagination.size, offset, count, content))
    }

    async fn find_one(&self, _user: &User, id: i64) -> Result<Movie, AppError> {
        self.movies
            .read()
            .await
            .iter()
            .find(|m| m.id == Some(id))
            .cloned()
            .ok_or_else(|| AppError::not_found(Movie::NAME, id_details(id)))
    }

    async fn find_by(&self, _user: &User, filters: &Map<String, Value>) -> Result<Movie, AppError> {
        let code = filters
            .get("code")
            .and_then(filter_value)
            .ok_or_else(|| AppError::invalid_arguments("code", json!({ "code": "required" })))?;

        self.movies
            .read()
            .await
            .iter()
            .find(|m| m.code == code)
            .cloned()
            .ok_or_else(|| AppError::not_found(Movie::NAME, json!({ "code": code })))
    }

    async fn update(&self, _user: &User, element: Movie) -> Result<Movie, AppError> {
        let id = element
            .id
            .ok_or_else(|| AppError::invalid_argument("id", "Id must not be null"))?;

        let mut movies = self.movies.write().await;

        if movies
            .iter()
            .any(|m| m.code == element.code && m.id != Some(id))
        {
            return Err(AppError::already_exists(
                Movie::NAME,
                json!({ "code": element.code }),
            ));
        }

        let stored = movies
            .iter_mut()
            .find(|m| m.id == Some(id))
            .ok_or_else(|| AppError::not_found(Movie::NAME, id_details(id)))?;

        stored.title = element.title;
        stored.rate = element.rate;
        stored.language = element.language;
        stored.director = element.director;
        stored.cast = element.cast;
        stored.code = element.code;
        stored.updated_at = Some(Utc::now());

        tracing::debug!(id, "Movie updated");
        Ok(stored.clone())
    }

    async fn delete(&self, _user: &User, id: i64) -> Result<(), AppError> {
        let mut movies = self.movies.write().await;

        let position = movies
            .iter()
            .position(|m| m.id == Some(id))
            .ok_or_else(|| AppError::not_found(Movie::NAME, id_details(id)))?;

        movies.remove(position);
        tracing::debug!(id, "Movie deleted");
        Ok(())
    }

    async fn count(&self, _user: &User, filters: &Map<String, Value>) -> Result<usize, AppError> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .filter(|m| matches(m, filters))
            .count())
    }

    async fn exists(&self, _user: &User, id: i64) -> Result<bool, AppError> {
        Ok(self.movies.read().await.iter().any(|m| m.id == Some(id)))
    }
}
