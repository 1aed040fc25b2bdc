mod common;

use blockbuster_gateway::api::gateway::handle_event;
use serde_json::json;

#[tokio::test]
async fn test_event_round_trip() {
    let dispatcher = common::create_dispatcher(common::seeded_services(0));

    let created = handle_event(
        &dispatcher,
        json!({
            "path": "/movies",
            "httpMethod": "POST",
            "body": common::movie_json("tokyo").to_string()
        }),
    )
    .await;
    assert_eq!(created.status_code, 200);
    let id = created.json()["id"].as_i64().unwrap();

    let found = handle_event(
        &dispatcher,
        json!({
            "path": format!("/movies/{id}"),
            "httpMethod": "GET",
            "pathParameters": { "id": id.to_string() }
        }),
    )
    .await;
    assert_eq!(found.status_code, 200);
    assert_eq!(found.json(), created.json());

    let deleted = handle_event(
        &dispatcher,
        json!({
            "path": "/movies",
            "httpMethod": "DELETE",
            "body": { "id": id }
        }),
    )
    .await;
    assert_eq!(deleted.status_code, 204);
    assert!(deleted.body.is_none());

    let missing = handle_event(
        &dispatcher,
        json!({
            "path": format!("/movies/{id}"),
            "httpMethod": "GET",
            "pathParameters": { "id": id }
        }),
    )
    .await;
    assert_eq!(missing.status_code, 404);
}

#[tokio::test]
async fn test_event_paging_from_query_strings() {
    let dispatcher = common::create_dispatcher(common::seeded_services(12));

    let response = handle_event(
        &dispatcher,
        json!({
            "path": "/movies",
            "httpMethod": "get",
            "queryStringParameters": { "page": "2", "size": "5" }
        }),
    )
    .await;

    assert_eq!(response.status_code, 200);
    let body = response.json();
    assert_eq!(body["content"][0]["id"], 6);
    assert_eq!(body["content"][4]["id"], 10);
    assert_eq!(body["metadata"]["pageNumber"], 2);
}

#[tokio::test]
async fn test_event_size_is_capped() {
    let dispatcher = common::create_dispatcher(common::seeded_services(120));

    let response = handle_event(
        &dispatcher,
        json!({
            "path": "/movies",
            "httpMethod": "GET",
            "queryStringParameters": { "size": 500 }
        }),
    )
    .await;

    let body = response.json();
    assert_eq!(body["content"].as_array().unwrap().len(), 100);
    assert_eq!(body["metadata"]["totalPages"], 2);
}

#[tokio::test]
async fn test_event_missing_method() {
    let dispatcher = common::create_dispatcher(common::seeded_services(0));

    let response = handle_event(&dispatcher, json!({ "path": "/movies" })).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(response.json()["error"]["code"], "invalid_arguments");
}

#[tokio::test]
async fn test_event_not_an_object() {
    let dispatcher = common::create_dispatcher(common::seeded_services(0));

    let response = handle_event(&dispatcher, json!("GET /movies")).await;

    assert_eq!(response.status_code, 400);
}

#[tokio::test]
async fn test_event_largest_page_is_empty() {
    let dispatcher = common::create_dispatcher(common::seeded_services(3));

    let response = handle_event(
        &dispatcher,
        json!({
            "path": "/movies",
            "httpMethod": "GET",
            "queryStringParameters": { "page": i64::MAX.to_string(), "size": "100" }
        }),
    )
    .await;

    assert_eq!(response.status_code, 200);
    let body = response.json();
    assert_eq!(body["content"], json!([]));
    assert_eq!(body["metadata"]["totalElements"], 3);
    assert_eq!(body["metadata"]["last"], false);
}
