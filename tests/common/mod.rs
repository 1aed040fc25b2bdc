#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use blockbuster_gateway::application::dispatch::{HandlerRegistry, RequestDispatcher, RouteTable};
use blockbuster_gateway::domain::entities::{Movie, Person};
use blockbuster_gateway::infrastructure::memory::MovieService;
use blockbuster_gateway::routes::api_router;
use blockbuster_gateway::state::{AppState, Services};
use serde_json::{Value, json};

pub const ROUTES: &str = r#"
[[routes]]
pattern = "/movies(/.*)?"
handler = "movies.movie"
"#;

pub fn movie(code: &str) -> Movie {
    Movie::new(
        format!("Movie {code}"),
        7.0,
        "EN",
        Person::new("Sofia", "Coppola"),
        vec![Person::new("Bill", "Murray")],
        code,
    )
}

pub fn movie_json(code: &str) -> Value {
    json!({
        "title": format!("Movie {code}"),
        "rate": 7.0,
        "language": "EN",
        "director": { "name": "Sofia", "surname": "Coppola" },
        "cast": [{ "name": "Bill", "surname": "Murray" }],
        "code": code
    })
}

/// Services over a store holding movies with ids `1..=count`.
pub fn seeded_services(count: i64) -> Services {
    let movies = (1..=count)
        .map(|id| movie(&format!("m{id}")).with_id(id))
        .collect();
    Services::new(Arc::new(MovieService::with_movies(movies)))
}

pub fn create_dispatcher(services: Services) -> RequestDispatcher {
    let registry = HandlerRegistry::builtin().unwrap();
    let table = RouteTable::from_toml_str(ROUTES, &registry).unwrap();
    RequestDispatcher::new(Arc::new(table), services)
}

pub fn create_test_state(services: Services) -> AppState {
    let dispatcher = create_dispatcher(services);
    let route_count = dispatcher.routes().len();
    AppState::new(Arc::new(dispatcher), route_count)
}

pub fn create_test_server(services: Services) -> TestServer {
    TestServer::new(api_router(create_test_state(services))).unwrap()
}
