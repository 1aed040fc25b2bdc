//! Contract every entity-specific store implements.

use crate::domain::page::{Page, Pagination};
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// CRUD capabilities over entities of type `T`, performed on behalf of actor `U`.
///
/// Authorization against `U` is the implementer's responsibility. Each
/// implementation owns its store and any synchronization it needs; the contract
/// gives no ordering guarantee between concurrent mutations of the same id.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::MovieService`] - in-memory movie store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CrudService<T, U>: Send + Sync
where
    T: Send + Sync + 'static,
    U: Send + Sync + 'static,
{
    /// Persists a new element.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EntityAlreadyExists`] if a uniqueness constraint is violated.
    async fn create(&self, user: &U, element: T) -> Result<T, AppError>;

    /// Returns one window of the elements matching `filters`.
    ///
    /// An empty result is a page with no content, never an error.
    async fn find_all(
        &self,
        user: &U,
        filters: &Map<String, Value>,
        pagination: Pagination,
    ) -> Result<Page<T>, AppError>;

    /// Finds an element by its unique id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EntityNotFound`] if no element has that id.
    async fn find_one(&self, user: &U, id: i64) -> Result<T, AppError>;

    /// Finds an element by a natural key carried in `filters`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EntityNotFound`] if nothing matches.
    async fn find_by(&self, user: &U, filters: &Map<String, Value>) -> Result<T, AppError>;

    /// Replaces all mutable fields of the element with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EntityNotFound`] if the id does not resolve.
    async fn update(&self, user: &U, element: T) -> Result<T, AppError>;

    /// Removes the element with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EntityNotFound`] if no element has that id.
    async fn delete(&self, user: &U, id: i64) -> Result<(), AppError>;

    /// Number of elements matching `filters`.
    async fn count(&self, user: &U, filters: &Map<String, Value>) -> Result<usize, AppError>;

    /// Whether an element with the given id exists.
    async fn exists(&self, user: &U, id: i64) -> Result<bool, AppError>;
}
