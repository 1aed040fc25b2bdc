//! HTTP server initialization and runtime setup.
//!
//! Handles route table loading, store seeding and the Axum server lifecycle.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use validator::Validate;

use crate::application::dispatch::{HandlerRegistry, RequestDispatcher, RouteTable};
use crate::config::Config;
use crate::domain::entities::Movie;
use crate::domain::services::CrudService;
use crate::domain::user::User;
use crate::infrastructure::memory::MovieService;
use crate::routes::app_router;
use crate::state::{AppState, Services};

/// Loads the route table at `routes_file` against the built-in handlers and
/// binds it to `services`.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed, a pattern does not
/// compile, a handler name is unknown or the table is empty.
pub fn build_dispatcher(routes_file: &Path, services: Services) -> Result<RequestDispatcher> {
    let registry = HandlerRegistry::builtin()?;
    let table = RouteTable::load(routes_file, &registry)
        .with_context(|| format!("Failed to load routes from {}", routes_file.display()))?;

    Ok(RequestDispatcher::new(Arc::new(table), services))
}

/// Reads a JSON array of movies from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or a movie fails validation.
pub async fn read_seed(path: &Path) -> Result<Vec<Movie>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;

    let movies: Vec<Movie> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;

    for movie in &movies {
        movie
            .validate()
            .with_context(|| format!("Invalid movie '{}' in seed file", movie.code))?;
    }

    Ok(movies)
}

/// Builds services, preloading movies from `seed_file` when given.
///
/// # Errors
///
/// Returns an error if the seed cannot be read or contains duplicates.
pub async fn build_services(seed_file: Option<&Path>) -> Result<Services> {
    let movies = MovieService::new();

    if let Some(path) = seed_file {
        let seed = read_seed(path).await?;
        let count = seed.len();
        let user = User::anonymous();

        for movie in seed {
            movies
                .create(&user, movie)
                .await
                .context("Failed to seed movie store")?;
        }

        tracing::info!(count, "Movie store seeded");
    }

    Ok(Services::new(Arc::new(movies)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Movie store (optionally seeded)
/// - Route table and dispatcher
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - The route table fails to load
/// - Seeding fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let services = build_services(config.seed_file.as_deref()).await?;

    let dispatcher = build_dispatcher(&config.routes_file, services)?;
    let route_count = dispatcher.routes().len();
    tracing::info!(routes = route_count, "Route table loaded");

    let state = AppState::new(Arc::new(dispatcher), route_count);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_build_services_with_seed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"title": "Alien", "rate": 8.5, "code": "alien"}},
                {{"title": "Heat", "rate": 8.3, "code": "heat", "language": "EN"}}
            ]"#
        )
        .unwrap();

        let services = build_services(Some(file.path())).await.unwrap();
        let count = services
            .movies
            .count(&User::anonymous(), &serde_json::Map::new())
            .await
            .unwrap();

        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_seed_with_invalid_movie_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"title": "", "rate": 42, "code": "x"}}]"#).unwrap();

        assert!(read_seed(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_seed_with_duplicate_codes_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"title": "A", "code": "x"}}, {{"title": "B", "code": "x"}}]"#
        )
        .unwrap();

        assert!(build_services(Some(file.path())).await.is_err());
    }

    #[test]
    fn test_build_dispatcher_missing_file() {
        let err = build_dispatcher(Path::new("/no/such/routes.toml"), Services::in_memory())
            .err()
            .expect("expected build_dispatcher to fail");
        assert!(err.to_string().contains("Failed to load routes"));
    }
}
