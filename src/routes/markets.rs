use axum::extract::{Path, State};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{CreateMarket, Market, UpdateMarket};
use crate::services::auth::CurrentUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fetch_markets).post(create_market))
        .route("/:id", put(update_market))
        .route("/:id", delete(delete_market))
}

pub async fn fetch_markets(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Result<Json<Vec<Market>>, AppError> {
    info!("GET /markets - Fetching all markets");
    let markets = db::market_queries::fetch_all(&state.pool).await?;
    Ok(Json(markets))
}

pub async fn create_market(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(data): Json<CreateMarket>,
) -> Result<Json<Market>, AppError> {
    info!("POST /markets - Creating market {}", data.name);
    current.require_admin()?;
    if data.name.trim().is_empty() {
        return Err(AppError::Validation("Market name cannot be empty".into()));
    }
    let market = db::market_queries::insert(&state.pool, Market::new(data.name.trim().to_string()))
        .await
        .map_err(|e| {
            error!("Failed to create market: {}", e);
            AppError::from(e)
        })?;
    Ok(Json(market))
}

pub async fn update_market(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateMarket>,
) -> Result<Json<Market>, AppError> {
    info!("PUT /markets/{} - Updating market", id);
    current.require_admin()?;
    if data.name.trim().is_empty() {
        return Err(AppError::Validation("Market name cannot be empty".into()));
    }
    let market = db::market_queries::update(&state.pool, id, data)
        .await?
        .ok_or_else(|| AppError::NotFound("Market not found".to_string()))?;
    Ok(Json(market))
}

pub async fn delete_market(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, AppError> {
    info!("DELETE /markets/{} - Deleting market", id);
    current.require_admin()?;
    match db::market_queries::delete(&state.pool, id).await {
        Ok(0) => {
            error!("Market {} not found for deletion", id);
            Err(AppError::NotFound("Market not found".to_string()))
        }
        Ok(_) => Ok(Json(())),
        Err(e) => {
            error!("Failed to delete market {}: {}", id, e);
            Err(AppError::from(e))
        }
    }
}
