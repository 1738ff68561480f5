use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::db::{commodity_queries, price_record_queries};
use crate::errors::AppError;
use crate::models::{
    CommoditySnapshot, CreatePriceRecord, PriceRecord, UpdateNoteAndAverages,
};
use crate::services::auth::CurrentUser;
use crate::services::{aggregation, quotes};

/// Creates the first record for a (date, market, commodity) key. The
/// commodity name/unit are snapshotted onto the record; the explicit average
/// wins over the computed one when both are present.
pub async fn create(
    pool: &PgPool,
    current: &CurrentUser,
    input: CreatePriceRecord,
) -> Result<PriceRecord, AppError> {
    let market = current.resolve_market(input.market)?;

    let commodity = commodity_queries::fetch_one(pool, input.commodity_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Commodity not found".to_string()))?;

    if price_record_queries::exists_for_key(pool, input.date, &market, input.commodity_id).await? {
        return Err(AppError::Validation(
            "A price record already exists for this date, market and commodity".into(),
        ));
    }

    let mut quote_list = Vec::new();
    for price in input.merchant_prices {
        quote_list = quotes::add_quote(quote_list, price)?;
    }

    let avg_today = input
        .avg_today
        .or_else(|| aggregation::recompute_average(&quote_list))
        .unwrap_or(0);

    let now = chrono::Utc::now();
    let record = PriceRecord {
        id: Uuid::new_v4(),
        date: input.date,
        market,
        commodity_id: commodity.id,
        commodity: Json(CommoditySnapshot {
            id: commodity.id,
            name: commodity.name,
            unit: commodity.unit,
        }),
        merchant_prices: Json(quote_list),
        avg_today,
        avg_yesterday: input.avg_yesterday.unwrap_or(0),
        notes: input
            .notes
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "-".to_string()),
        created_at: now,
        updated_at: now,
    };

    info!(
        "Creating price record for {} at {} on {}",
        record.commodity.0.name, record.market, record.date
    );
    let record = price_record_queries::insert(pool, record).await?;
    Ok(record)
}

pub async fn update_notes(
    pool: &PgPool,
    id: Uuid,
    input: UpdateNoteAndAverages,
) -> Result<PriceRecord, AppError> {
    price_record_queries::update_note_and_averages(pool, id, input)
        .await?
        .ok_or_else(|| AppError::NotFound("Price record not found".to_string()))
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    match price_record_queries::delete(pool, id).await? {
        0 => Err(AppError::NotFound("Price record not found".to_string())),
        _ => Ok(()),
    }
}

/// Deletes every market's record for one (date, commodity) group. Each
/// delete is an independent store call; outcomes are collected so a partial
/// failure reports exactly which records remain.
pub async fn delete_group(
    pool: &PgPool,
    date: NaiveDate,
    commodity_id: Uuid,
) -> Result<Vec<Uuid>, AppError> {
    let records =
        price_record_queries::fetch_filtered(pool, Some(date), None, Some(commodity_id)).await?;
    if records.is_empty() {
        return Err(AppError::NotFound(
            "No price records for this date and commodity".to_string(),
        ));
    }

    let mut outcomes = Vec::with_capacity(records.len());
    for record in &records {
        let result = price_record_queries::delete(pool, record.id).await;
        outcomes.push((record.id, result.map(|_| ())));
    }

    summarize_cascade(outcomes)
}

/// Full success returns the deleted ids; total failure surfaces the first
/// store error; a mix becomes `PartialCascade` listing both sides. No
/// rollback is attempted.
pub fn summarize_cascade(
    outcomes: Vec<(Uuid, Result<(), sqlx::Error>)>,
) -> Result<Vec<Uuid>, AppError> {
    let mut deleted = Vec::new();
    let mut failed = Vec::new();
    let mut first_error = None;

    for (id, result) in outcomes {
        match result {
            Ok(()) => deleted.push(id),
            Err(e) => {
                error!("Failed to delete price record {}: {}", id, e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
                failed.push(id);
            }
        }
    }

    match (deleted.is_empty(), first_error) {
        (_, None) => Ok(deleted),
        (true, Some(e)) => Err(AppError::Db(e)),
        (false, Some(_)) => Err(AppError::PartialCascade { deleted, failed }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_full_success() {
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let outcomes = ids.iter().map(|&id| (id, Ok(()))).collect();

        let deleted = summarize_cascade(outcomes).unwrap();
        assert_eq!(deleted, ids);
    }

    #[test]
    fn test_cascade_partial_failure_reports_both_sides() {
        // Second of three deletes fails: the first record is gone, the rest
        // must be reported as failed rather than a clean success.
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let outcomes = vec![
            (ids[0], Ok(())),
            (ids[1], Err(sqlx::Error::PoolClosed)),
            (ids[2], Ok(())),
        ];

        match summarize_cascade(outcomes) {
            Err(AppError::PartialCascade { deleted, failed }) => {
                assert_eq!(deleted, vec![ids[0], ids[2]]);
                assert_eq!(failed, vec![ids[1]]);
            }
            other => panic!("expected PartialCascade, got {:?}", other),
        }
    }

    #[test]
    fn test_cascade_total_failure_is_store_error() {
        let outcomes = vec![
            (Uuid::new_v4(), Err(sqlx::Error::PoolClosed)),
            (Uuid::new_v4(), Err(sqlx::Error::PoolClosed)),
        ];

        assert!(matches!(summarize_cascade(outcomes), Err(AppError::Db(_))));
    }
}
