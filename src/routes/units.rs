use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{CreateUnit, Unit};
use crate::services;
use crate::services::auth::CurrentUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fetch_units).post(create_unit))
        .route("/:id", delete(delete_unit))
}

pub async fn fetch_units(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Result<Json<Vec<Unit>>, AppError> {
    info!("GET /units - Fetching all units");
    let units = db::unit_queries::fetch_all(&state.pool).await?;
    Ok(Json(units))
}

pub async fn create_unit(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(data): Json<CreateUnit>,
) -> Result<Json<Unit>, AppError> {
    info!("POST /units - Creating unit {}", data.name);
    current.require_admin()?;
    let unit = services::units::create(&state.pool, data.name)
        .await
        .map_err(|e| {
            error!("Failed to create unit: {}", e);
            e
        })?;
    Ok(Json(unit))
}

pub async fn delete_unit(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, AppError> {
    info!("DELETE /units/{} - Deleting unit", id);
    current.require_admin()?;
    match db::unit_queries::delete(&state.pool, id).await? {
        0 => Err(AppError::NotFound("Unit not found".to_string())),
        _ => Ok(Json(())),
    }
}
