use axum::extract::{Path, State};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CreateUser, UpdateUser, UserProfile};
use crate::services;
use crate::services::auth::CurrentUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fetch_users).post(create_user))
        .route("/:id", put(update_user))
        .route("/:id", delete(delete_user))
}

pub async fn fetch_users(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<UserProfile>>, AppError> {
    info!("GET /users - Fetching all users");
    current.require_admin()?;
    let users = services::users::fetch_all(&state.pool).await?;
    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(data): Json<CreateUser>,
) -> Result<Json<UserProfile>, AppError> {
    info!("POST /users - Creating user {}", data.username);
    current.require_admin()?;
    let user = services::users::create(&state.pool, data)
        .await
        .map_err(|e| {
            error!("Failed to create user: {}", e);
            e
        })?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateUser>,
) -> Result<Json<UserProfile>, AppError> {
    info!("PUT /users/{} - Updating user", id);
    current.require_admin()?;
    let user = services::users::update(&state.pool, id, data).await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, AppError> {
    info!("DELETE /users/{} - Deleting user", id);
    current.require_admin()?;
    services::users::delete(&state.pool, id).await?;
    Ok(Json(()))
}
