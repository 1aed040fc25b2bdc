//! Movie endpoints, routed through the generic entity controller.

use crate::application::controllers::entity_controller;
use crate::application::dispatch::{HandlerFuture, HandlerRegistry, RouteLoadError};
use crate::domain::request::Request;
use crate::state::Services;

/// Registry name of [`movie`], as referenced from the route file.
pub const MOVIE_HANDLER: &str = "movies.movie";

/// Handles every `/movies` request with the shared movie service.
pub fn movie(services: Services, request: Request) -> HandlerFuture {
    Box::pin(async move {
        entity_controller::route(&request, services.movies.as_ref())
            .await?
            .into_reply()
    })
}

/// Adds the movie handlers to `registry`.
///
/// # Errors
///
/// Returns [`RouteLoadError::DuplicateHandler`] if a name is already taken.
pub fn register(registry: &mut HandlerRegistry) -> Result<(), RouteLoadError> {
    registry.register(MOVIE_HANDLER, movie)?;
    Ok(())
}
