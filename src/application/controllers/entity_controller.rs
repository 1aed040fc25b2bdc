//! Generic HTTP-to-CRUD routing shared by every entity controller.

use serde::Serialize;
use serde_json::{Value, json};

use crate::application::pagination::{compute_pagination, navigation_links};
use crate::application::reply::Reply;
use crate::domain::entities::Entity;
use crate::domain::page::Page;
use crate::domain::request::Request;
use crate::domain::services::CrudService;
use crate::domain::user::User;
use crate::error::{AppError, map_validation_errors};
use crate::utils::params::any_to_int;

pub const HTTP_GET: &str = "get";
pub const HTTP_POST: &str = "post";
pub const HTTP_PUT: &str = "put";
pub const HTTP_PATCH: &str = "patch";
pub const HTTP_DELETE: &str = "delete";

/// Resource suffix that selects natural-key lookup.
const FIND_ONE_SUFFIX: &str = "findone";

/// What a routed request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Routed<T> {
    Entity(T),
    Page(Page<T>),
    Deleted,
}

impl<T: Serialize> Routed<T> {
    /// Serializes the outcome for the transport boundary.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if serialization fails.
    pub fn into_reply(self) -> Result<Reply, AppError> {
        match self {
            Self::Entity(entity) => Reply::json(&entity),
            Self::Page(page) => Reply::json(&page),
            Self::Deleted => Ok(Reply::Empty),
        }
    }
}

/// Routes a request onto `service` by HTTP method and path shape.
///
/// # GET priority
///
/// 1. Resource ending in `findOne` (any case): natural-key lookup with the query parameters
/// 2. `id` path parameter: lookup by id; the id must be an integer
/// 3. Otherwise: paged listing, with the window taken from `page`/`size`
///
/// # Mutations
///
/// - `POST` creates the body entity
/// - `PUT` and `PATCH` both replace the entity identified by the body's id
/// - `DELETE` removes the entity identified by the body's id
///
/// Every call runs as [`User::anonymous`].
///
/// # Errors
///
/// - [`AppError::InvalidArguments`] if the method or a required body is missing,
///   or the body does not deserialize or validate
/// - [`AppError::InvalidArgument`] for a non-integer `id`, `page` or `size`
/// - [`AppError::UnsupportedMethod`] for any other method
/// - Whatever the service returns, unmodified
pub async fn route<T, S>(request: &Request, service: &S) -> Result<Routed<T>, AppError>
where
    T: Entity,
    S: CrudService<T, User> + ?Sized,
{
    let method = request
        .http_method()
        .ok_or_else(|| AppError::invalid_arguments("httpMethod", json!({})))?
        .to_ascii_lowercase();
    let resource = request.resource();
    let headers = request.headers();
    let path_parameters = request.path_parameters();
    let query = request.query_parameters();
    let user = User::anonymous();

    tracing::debug!(
        method = %method,
        resource,
        headers = headers.len(),
        entity = T::NAME,
        "Routing entity request"
    );

    match method.as_str() {
        HTTP_GET => {
            if resource.to_ascii_lowercase().ends_with(FIND_ONE_SUFFIX) {
                service.find_by(&user, &query).await.map(Routed::Entity)
            } else if let Some(id) = path_parameters.get("id") {
                let id = parse_id(id)?;
                service.find_one(&user, id).await.map(Routed::Entity)
            } else {
                let pagination = compute_pagination(&query)?;
                let page = service.find_all(&user, &query, pagination).await?;
                let path = request.path().unwrap_or(resource);
                let links = navigation_links(path, &query, pagination, page.metadata());
                Ok(Routed::Page(page.with_links(links)))
            }
        }
        HTTP_POST => {
            let entity = validated(parse_entity::<T>(raw_body(request)?)?)?;
            service.create(&user, entity).await.map(Routed::Entity)
        }
        HTTP_PUT | HTTP_PATCH => {
            let entity = validated(parse_entity::<T>(raw_body(request)?)?)?;
            service.update(&user, entity).await.map(Routed::Entity)
        }
        HTTP_DELETE => {
            let entity = parse_entity::<T>(raw_body(request)?)?;
            let id = entity
                .id()
                .ok_or_else(|| AppError::invalid_argument("id", "Id must not be null"))?;
            service.delete(&user, id).await?;
            Ok(Routed::Deleted)
        }
        _ => Err(AppError::unsupported_method(method)),
    }
}

fn parse_id(value: &Value) -> Result<i64, AppError> {
    any_to_int(value, "id").map_err(|_| AppError::invalid_argument("id", "Id must be an integer"))
}

fn raw_body(request: &Request) -> Result<&Value, AppError> {
    request
        .body()
        .ok_or_else(|| AppError::invalid_arguments("body", json!({})))
}

/// Deserializes a body that is either JSON text or an already parsed object.
fn parse_entity<T: Entity>(raw: &Value) -> Result<T, AppError> {
    let parsed = match raw {
        Value::String(text) => serde_json::from_str(text),
        other => serde_json::from_value(other.clone()),
    };

    parsed.map_err(|e| AppError::invalid_arguments(T::NAME, json!({ "reason": e.to_string() })))
}

fn validated<T: Entity>(entity: T) -> Result<T, AppError> {
    entity
        .validate()
        .map_err(|e| map_validation_errors(T::NAME, e))?;
    Ok(entity)
}
