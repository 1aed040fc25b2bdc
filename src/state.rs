//! Shared application state.

use std::sync::Arc;

use crate::application::dispatch::Dispatcher;
use crate::domain::entities::Movie;
use crate::domain::services::CrudService;
use crate::domain::user::User;
use crate::infrastructure::memory::MovieService;

/// Entity services handed to every dispatched handler.
#[derive(Clone)]
pub struct Services {
    pub movies: Arc<dyn CrudService<Movie, User>>,
}

impl Services {
    pub fn new(movies: Arc<dyn CrudService<Movie, User>>) -> Self {
        Self { movies }
    }

    /// Services backed by empty in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MovieService::new()))
    }
}

/// State shared across axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<dyn Dispatcher>,
    /// Number of routes in the loaded table, reported by the health endpoint.
    pub route_count: usize,
}

impl AppState {
    pub fn new(dispatcher: Arc<dyn Dispatcher>, route_count: usize) -> Self {
        Self {
            dispatcher,
            route_count,
        }
    }
}
