use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ErrorMessage, UserError};
use crate::models::{CreateUser, DeleteResponse, UpdateUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(create_user, list_users, get_user, update_user, delete_user),
    components(schemas(CreateUser, UpdateUser, UserResponse, DeleteResponse, ErrorMessage)),
    tags(
        (name = "Users", description = "User management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(shared_service)
}

/// Fixed response for a syntactically invalid user id. Plain text, unlike
/// the JSON bodies produced by the error normalizer.
fn invalid_user_id() -> Response {
    (StatusCode::BAD_REQUEST, "Invalid user id.").into_response()
}

/// Fixed response for a well-formed id with no matching user. Plain text.
fn user_not_found() -> Response {
    (StatusCode::NOT_FOUND, "User not found.").into_response()
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failure or duplicated key", body = ErrorMessage),
        (status = 500, description = "Internal server error", body = ErrorMessage)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Json(input): Json<CreateUser>,
) -> Result<Json<UserResponse>, UserError> {
    let user = service.create_user(input).await?;
    Ok(Json(user))
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "List of users, passwords excluded", body = Vec<UserResponse>),
        (status = 500, description = "Internal server error", body = ErrorMessage)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> Result<Json<Vec<UserResponse>>, UserError> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User id (24-character hex ObjectId)")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid user id", body = String, content_type = "text/plain"),
        (status = 404, description = "User not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = ErrorMessage)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> Result<Response, UserError> {
    // Well-formedness comes before any store access so a malformed id
    // cannot surface as a storage failure.
    let Ok(id) = ObjectId::parse_str(&id) else {
        return Ok(invalid_user_id());
    };

    match service.get_user(id).await? {
        Some(user) => Ok(Json(user).into_response()),
        None => Ok(user_not_found()),
    }
}

/// Update a user by id
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User id (24-character hex ObjectId)")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid user id or validation failure"),
        (status = 404, description = "User not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = ErrorMessage)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUser>,
) -> Result<Response, UserError> {
    let Ok(id) = ObjectId::parse_str(&id) else {
        return Ok(invalid_user_id());
    };

    match service.update_user(id, input).await? {
        Some(user) => Ok(Json(user).into_response()),
        None => Ok(user_not_found()),
    }
}

/// Delete a user by id
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User id (24-character hex ObjectId)")
    ),
    responses(
        (status = 200, description = "User deleted", body = DeleteResponse),
        (status = 400, description = "Invalid user id", body = String, content_type = "text/plain"),
        (status = 404, description = "User not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = ErrorMessage)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> Result<Response, UserError> {
    let Ok(id) = ObjectId::parse_str(&id) else {
        return Ok(invalid_user_id());
    };

    if service.delete_user(id).await? {
        Ok(Json(DeleteResponse {
            message: "User deleted successfully.".to_string(),
        })
        .into_response())
    } else {
        Ok(user_not_found())
    }
}
