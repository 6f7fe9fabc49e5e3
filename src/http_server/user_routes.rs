//! User HTTP Routes
//!
//! CRUD endpoints over the `users` collection. Handlers parse and validate
//! the request, then run the store operation on the blocking pool.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use crate::model::{NewUser, User, UserId};
use crate::store::{StoreResult, UserStore};

pub const USER_CREATED_MESSAGE: &str = "User created successfully";
pub const USER_UPDATED_MESSAGE: &str = "User updated successfully";
pub const USER_DELETED_MESSAGE: &str = "User deleted successfully";

// ==================
// Shared State
// ==================

/// State shared across user handlers
pub struct UserState {
    pub store: UserStore,
}

impl UserState {
    pub fn new(store: UserStore) -> Self {
        Self { store }
    }
}

// ==================
// Request/Response Types
// ==================

/// `POST /users` body: the created record with a message alongside its fields
#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    #[serde(flatten)]
    pub user: User,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct UpdatedUserResponse {
    pub user: User,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ==================
// User Routes
// ==================

/// Create user routes
pub fn user_routes(state: Arc<UserState>) -> Router {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/:id",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn parse_candidate(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<NewUser> {
    let Json(candidate) = payload.map_err(|e| ApiError::MalformedRequest(e.body_text()))?;

    if !candidate.is_object() {
        return Err(ApiError::MalformedRequest(
            "Request body must be a JSON object".to_string(),
        ));
    }

    NewUser::from_candidate(&candidate).map_err(ApiError::Validation)
}

fn parse_user_id(path: Result<Path<UserId>, PathRejection>) -> ApiResult<UserId> {
    path.map(|Path(id)| id).map_err(|_| ApiError::RouteNotFound)
}

/// Runs a store operation on the blocking pool; rusqlite is synchronous.
async fn run_store<T, F>(state: &UserState, op: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&UserStore) -> StoreResult<T> + Send + 'static,
{
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {}", e)))?
        .map_err(ApiError::from)
}

// ==================
// Handlers
// ==================

async fn create_user_handler(
    State(state): State<Arc<UserState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedUserResponse>)> {
    let new_user = parse_candidate(payload)?;
    let user = run_store(&state, move |store| store.create(&new_user)).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            user,
            message: USER_CREATED_MESSAGE,
        }),
    ))
}

async fn list_users_handler(
    State(state): State<Arc<UserState>>,
) -> ApiResult<Json<UsersListResponse>> {
    let users = run_store(&state, |store| store.list_all()).await?;
    Ok(Json(UsersListResponse { users }))
}

async fn get_user_handler(
    State(state): State<Arc<UserState>>,
    path: Result<Path<UserId>, PathRejection>,
) -> ApiResult<Json<UserResponse>> {
    let id = parse_user_id(path)?;
    let user = run_store(&state, move |store| store.get(id)).await?;
    Ok(Json(UserResponse { user }))
}

async fn update_user_handler(
    State(state): State<Arc<UserState>>,
    path: Result<Path<UserId>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<UpdatedUserResponse>> {
    let id = parse_user_id(path)?;
    let new_user = parse_candidate(payload)?;
    let user = run_store(&state, move |store| store.update(id, &new_user)).await?;

    Ok(Json(UpdatedUserResponse {
        user,
        message: USER_UPDATED_MESSAGE,
    }))
}

async fn delete_user_handler(
    State(state): State<Arc<UserState>>,
    path: Result<Path<UserId>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_user_id(path)?;
    run_store(&state, move |store| store.delete(id)).await?;

    Ok(Json(MessageResponse {
        message: USER_DELETED_MESSAGE,
    }))
}
