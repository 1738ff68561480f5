use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{PriceRecord, UpdateNoteAndAverages, UpdateQuotesAndAverage};

const COLUMNS: &str = "id, date, market, commodity_id, commodity, merchant_prices, \
                       avg_today, avg_yesterday, notes, created_at, updated_at";

/// All records for one (date, market) pair, i.e. one worksheet's raw input.
pub async fn fetch_by_date_and_market(
    pool: &PgPool,
    date: NaiveDate,
    market: &str,
) -> Result<Vec<PriceRecord>, sqlx::Error> {
    sqlx::query_as::<_, PriceRecord>(&format!(
        "SELECT {COLUMNS} FROM price_records
         WHERE date = $1 AND market = $2
         ORDER BY created_at"
    ))
    .bind(date)
    .bind(market)
    .fetch_all(pool)
    .await
}

/// All records, optionally narrowed by date / market / commodity, newest
/// dates first. Feeds the cross-market comparison view.
pub async fn fetch_filtered(
    pool: &PgPool,
    date: Option<NaiveDate>,
    market: Option<&str>,
    commodity_id: Option<Uuid>,
) -> Result<Vec<PriceRecord>, sqlx::Error> {
    sqlx::query_as::<_, PriceRecord>(&format!(
        "SELECT {COLUMNS} FROM price_records
         WHERE ($1::date IS NULL OR date = $1)
           AND ($2::text IS NULL OR market = $2)
           AND ($3::uuid IS NULL OR commodity_id = $3)
         ORDER BY date DESC, created_at"
    ))
    .bind(date)
    .bind(market)
    .bind(commodity_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<PriceRecord>, sqlx::Error> {
    sqlx::query_as::<_, PriceRecord>(&format!(
        "SELECT {COLUMNS} FROM price_records WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_available_dates(pool: &PgPool) -> Result<Vec<NaiveDate>, sqlx::Error> {
    sqlx::query_scalar("SELECT DISTINCT date FROM price_records ORDER BY date DESC")
        .fetch_all(pool)
        .await
}

pub async fn exists_for_key(
    pool: &PgPool,
    date: NaiveDate,
    market: &str,
    commodity_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM price_records
         WHERE date = $1 AND market = $2 AND commodity_id = $3)",
    )
    .bind(date)
    .bind(market)
    .bind(commodity_id)
    .fetch_one(pool)
    .await
}

pub async fn insert(pool: &PgPool, input: PriceRecord) -> Result<PriceRecord, sqlx::Error> {
    sqlx::query_as::<_, PriceRecord>(&format!(
        "INSERT INTO price_records ({COLUMNS})
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         RETURNING {COLUMNS}"
    ))
    .bind(input.id)
    .bind(input.date)
    .bind(input.market)
    .bind(input.commodity_id)
    .bind(input.commodity)
    .bind(input.merchant_prices)
    .bind(input.avg_today)
    .bind(input.avg_yesterday)
    .bind(input.notes)
    .bind(input.created_at)
    .bind(input.updated_at)
    .fetch_one(pool)
    .await
}

/// Quote list and derived average are one atomic write.
pub async fn update_quotes(
    pool: &PgPool,
    id: Uuid,
    input: UpdateQuotesAndAverage,
) -> Result<Option<PriceRecord>, sqlx::Error> {
    sqlx::query_as::<_, PriceRecord>(&format!(
        "UPDATE price_records
         SET merchant_prices = $1, avg_today = $2, updated_at = now()
         WHERE id = $3
         RETURNING {COLUMNS}"
    ))
    .bind(sqlx::types::Json(input.merchant_prices))
    .bind(input.avg_today)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Note and explicit averages are the other atomic write group.
pub async fn update_note_and_averages(
    pool: &PgPool,
    id: Uuid,
    input: UpdateNoteAndAverages,
) -> Result<Option<PriceRecord>, sqlx::Error> {
    sqlx::query_as::<_, PriceRecord>(&format!(
        "UPDATE price_records
         SET avg_today = $1, avg_yesterday = $2, notes = $3, updated_at = now()
         WHERE id = $4
         RETURNING {COLUMNS}"
    ))
    .bind(input.avg_today)
    .bind(input.avg_yesterday)
    .bind(input.notes)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM price_records WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
