use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{CreatePriceRecord, PriceRecord, UpdateNoteAndAverages};
use crate::services;
use crate::services::auth::CurrentUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fetch_price_records).post(create_price_record))
        .route("/dates", get(fetch_available_dates))
        .route("/group", delete(delete_price_record_group))
        .route("/:id", put(update_price_record))
        .route("/:id", delete(delete_price_record))
        .route("/:id/quotes", post(add_quote))
        .route("/:id/quotes/:slot", put(edit_quote))
        .route("/:id/quotes/:slot", delete(remove_quote))
}

#[derive(Debug, Deserialize)]
pub struct RecordFilter {
    pub date: Option<NaiveDate>,
    pub market: Option<String>,
    #[serde(rename = "commodityId")]
    pub commodity_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct QuotePayload {
    pub price: i64,
}

#[derive(Debug, Deserialize)]
pub struct GroupKey {
    pub date: NaiveDate,
    #[serde(rename = "commodityId")]
    pub commodity_id: Uuid,
}

pub async fn fetch_price_records(
    State(state): State<AppState>,
    _current: CurrentUser,
    Query(filter): Query<RecordFilter>,
) -> Result<Json<Vec<PriceRecord>>, AppError> {
    info!("GET /price-records - Fetching records");
    let records = db::price_record_queries::fetch_filtered(
        &state.pool,
        filter.date,
        filter.market.as_deref(),
        filter.commodity_id,
    )
    .await?;
    Ok(Json(records))
}

pub async fn fetch_available_dates(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Result<Json<Vec<NaiveDate>>, AppError> {
    info!("GET /price-records/dates - Fetching available dates");
    let dates = db::price_record_queries::fetch_available_dates(&state.pool).await?;
    Ok(Json(dates))
}

pub async fn create_price_record(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(data): Json<CreatePriceRecord>,
) -> Result<Json<PriceRecord>, AppError> {
    info!("POST /price-records - Creating record");
    let record = services::records::create(&state.pool, &current, data)
        .await
        .map_err(|e| {
            error!("Failed to create price record: {}", e);
            e
        })?;
    Ok(Json(record))
}

pub async fn update_price_record(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateNoteAndAverages>,
) -> Result<Json<PriceRecord>, AppError> {
    info!("PUT /price-records/{} - Updating note and averages", id);
    ensure_can_write(&state.pool, &current, id).await?;
    let record = services::records::update_notes(&state.pool, id, data).await?;
    Ok(Json(record))
}

pub async fn delete_price_record(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, AppError> {
    info!("DELETE /price-records/{} - Deleting record", id);
    ensure_can_write(&state.pool, &current, id).await?;
    services::records::delete(&state.pool, id).await?;
    Ok(Json(()))
}

pub async fn delete_price_record_group(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(key): Query<GroupKey>,
) -> Result<Json<Vec<Uuid>>, AppError> {
    info!(
        "DELETE /price-records/group - Deleting group {} / {}",
        key.date, key.commodity_id
    );
    current.require_admin()?;
    let deleted = services::records::delete_group(&state.pool, key.date, key.commodity_id)
        .await
        .map_err(|e| {
            error!("Group delete failed: {}", e);
            e
        })?;
    Ok(Json(deleted))
}

pub async fn add_quote(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(data): Json<QuotePayload>,
) -> Result<Json<PriceRecord>, AppError> {
    info!("POST /price-records/{}/quotes - Adding quote", id);
    ensure_can_write(&state.pool, &current, id).await?;
    let record = services::quotes::add(&state.pool, id, data.price).await?;
    Ok(Json(record))
}

pub async fn edit_quote(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((id, slot)): Path<(Uuid, u32)>,
    Json(data): Json<QuotePayload>,
) -> Result<Json<PriceRecord>, AppError> {
    info!("PUT /price-records/{}/quotes/{} - Editing quote", id, slot);
    ensure_can_write(&state.pool, &current, id).await?;
    let record = services::quotes::edit(&state.pool, id, slot, data.price).await?;
    Ok(Json(record))
}

pub async fn remove_quote(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((id, slot)): Path<(Uuid, u32)>,
) -> Result<Json<PriceRecord>, AppError> {
    info!("DELETE /price-records/{}/quotes/{} - Removing quote", id, slot);
    ensure_can_write(&state.pool, &current, id).await?;
    let record = services::quotes::remove(&state.pool, id, slot).await?;
    Ok(Json(record))
}

// Officers may only touch records of their assigned market.
async fn ensure_can_write(
    pool: &PgPool,
    current: &CurrentUser,
    record_id: Uuid,
) -> Result<(), AppError> {
    let record = db::price_record_queries::fetch_one(pool, record_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Price record not found".to_string()))?;
    current.resolve_market(Some(record.market))?;
    Ok(())
}
