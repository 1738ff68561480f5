use axum::extract::{Path, State};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{Commodity, CreateCommodity, UpdateCommodity};
use crate::services::auth::CurrentUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fetch_commodities).post(create_commodity))
        .route("/:id", put(update_commodity))
        .route("/:id", delete(delete_commodity))
}

pub async fn fetch_commodities(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Result<Json<Vec<Commodity>>, AppError> {
    info!("GET /commodities - Fetching all commodities");
    let commodities = db::commodity_queries::fetch_all(&state.pool).await?;
    Ok(Json(commodities))
}

pub async fn create_commodity(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(data): Json<CreateCommodity>,
) -> Result<Json<Commodity>, AppError> {
    info!("POST /commodities - Creating commodity {}", data.name);
    current.require_admin()?;
    if data.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Commodity name cannot be empty".into(),
        ));
    }
    if data.unit.trim().is_empty() {
        return Err(AppError::Validation("Unit cannot be empty".into()));
    }
    let commodity = db::commodity_queries::insert(
        &state.pool,
        Commodity::new(data.name.trim().to_string(), data.unit.trim().to_string()),
    )
    .await
    .map_err(|e| {
        error!("Failed to create commodity: {}", e);
        AppError::from(e)
    })?;
    Ok(Json(commodity))
}

pub async fn update_commodity(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateCommodity>,
) -> Result<Json<Commodity>, AppError> {
    info!("PUT /commodities/{} - Updating commodity", id);
    current.require_admin()?;
    if data.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Commodity name cannot be empty".into(),
        ));
    }
    let commodity = db::commodity_queries::update(&state.pool, id, data)
        .await?
        .ok_or_else(|| AppError::NotFound("Commodity not found".to_string()))?;
    Ok(Json(commodity))
}

pub async fn delete_commodity(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, AppError> {
    info!("DELETE /commodities/{} - Deleting commodity", id);
    current.require_admin()?;
    match db::commodity_queries::delete(&state.pool, id).await? {
        0 => Err(AppError::NotFound("Commodity not found".to_string())),
        _ => Ok(Json(())),
    }
}
