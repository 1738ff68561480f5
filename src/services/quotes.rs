use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::db::price_record_queries;
use crate::errors::AppError;
use crate::models::{MerchantQuote, PriceRecord, UpdateQuotesAndAverage};
use crate::services::aggregation;

fn validate_price(price: i64) -> Result<(), AppError> {
    if price <= 0 {
        return Err(AppError::Validation(
            "Merchant price must be a positive amount".into(),
        ));
    }
    Ok(())
}

/// Restores the slot invariant: indices 1..N in the list's current order,
/// display names regenerated to match.
pub fn renumber(quotes: Vec<MerchantQuote>) -> Vec<MerchantQuote> {
    quotes
        .into_iter()
        .enumerate()
        .map(|(i, q)| MerchantQuote::new(i as u32 + 1, q.price))
        .collect()
}

/// Appends a quote at slot N+1.
pub fn add_quote(
    mut quotes: Vec<MerchantQuote>,
    price: i64,
) -> Result<Vec<MerchantQuote>, AppError> {
    validate_price(price)?;
    let slot = quotes.len() as u32 + 1;
    quotes.push(MerchantQuote::new(slot, price));
    Ok(quotes)
}

/// Replaces the price at an existing slot; slot and name are unchanged.
pub fn edit_quote(
    mut quotes: Vec<MerchantQuote>,
    slot: u32,
    new_price: i64,
) -> Result<Vec<MerchantQuote>, AppError> {
    validate_price(new_price)?;
    let quote = quotes
        .iter_mut()
        .find(|q| q.slot == slot)
        .ok_or_else(|| AppError::NotFound(format!("Merchant slot {} not found", slot)))?;
    quote.price = new_price;
    Ok(quotes)
}

/// Removes the entry at a slot and renumbers the remainder.
pub fn remove_quote(
    quotes: Vec<MerchantQuote>,
    slot: u32,
) -> Result<Vec<MerchantQuote>, AppError> {
    if !quotes.iter().any(|q| q.slot == slot) {
        return Err(AppError::NotFound(format!(
            "Merchant slot {} not found",
            slot
        )));
    }
    Ok(renumber(
        quotes.into_iter().filter(|q| q.slot != slot).collect(),
    ))
}

pub async fn add(pool: &PgPool, record_id: Uuid, price: i64) -> Result<PriceRecord, AppError> {
    let record = fetch_record(pool, record_id).await?;
    let quotes = add_quote(record.merchant_prices.0.clone(), price)?;
    info!(
        "Adding merchant quote to record {} (now {} quotes)",
        record_id,
        quotes.len()
    );
    persist(pool, record, quotes).await
}

pub async fn edit(
    pool: &PgPool,
    record_id: Uuid,
    slot: u32,
    new_price: i64,
) -> Result<PriceRecord, AppError> {
    let record = fetch_record(pool, record_id).await?;
    let quotes = edit_quote(record.merchant_prices.0.clone(), slot, new_price)?;
    persist(pool, record, quotes).await
}

pub async fn remove(pool: &PgPool, record_id: Uuid, slot: u32) -> Result<PriceRecord, AppError> {
    let record = fetch_record(pool, record_id).await?;
    let quotes = remove_quote(record.merchant_prices.0.clone(), slot)?;
    info!(
        "Removed merchant slot {} from record {} ({} quotes left)",
        slot,
        record_id,
        quotes.len()
    );
    persist(pool, record, quotes).await
}

async fn fetch_record(pool: &PgPool, record_id: Uuid) -> Result<PriceRecord, AppError> {
    price_record_queries::fetch_one(pool, record_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Price record not found".to_string()))
}

// Quotes and the recomputed average are written together as one update. An
// empty quote list keeps the previously stored (possibly hand-entered)
// average.
async fn persist(
    pool: &PgPool,
    record: PriceRecord,
    quotes: Vec<MerchantQuote>,
) -> Result<PriceRecord, AppError> {
    let avg_today = aggregation::recompute_average(&quotes).unwrap_or(record.avg_today);
    price_record_queries::update_quotes(
        pool,
        record.id,
        UpdateQuotesAndAverage {
            merchant_prices: quotes,
            avg_today,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Price record not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quotes(prices: &[i64]) -> Vec<MerchantQuote> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| MerchantQuote::new(i as u32 + 1, p))
            .collect()
    }

    fn assert_dense(quotes: &[MerchantQuote]) {
        for (i, q) in quotes.iter().enumerate() {
            assert_eq!(q.slot, i as u32 + 1);
            assert_eq!(q.name, format!("Pedagang {}", i as u32 + 1));
        }
    }

    #[test]
    fn test_add_appends_next_slot() {
        let list = add_quote(quotes(&[13000, 14000]), 12500).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[2].slot, 3);
        assert_eq!(list[2].name, "Pedagang 3");
        assert_eq!(list[2].price, 12500);
    }

    #[test]
    fn test_add_rejects_non_positive_price() {
        assert!(matches!(
            add_quote(vec![], 0),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            add_quote(vec![], -500),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_edit_changes_price_only() {
        let list = edit_quote(quotes(&[13000, 14000]), 2, 14500).unwrap();
        assert_eq!(list[1].price, 14500);
        assert_eq!(list[1].slot, 2);
        assert_eq!(list[1].name, "Pedagang 2");
    }

    #[test]
    fn test_edit_missing_slot_is_not_found() {
        assert!(matches!(
            edit_quote(quotes(&[13000]), 4, 14500),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove_middle_slot_renumbers_remainder() {
        // [{1,P1,13000},{2,P2,14000},{3,P3,13000}] minus slot 2
        // -> [{1,P1,13000},{2,P2,13000}]: old slot 3 becomes slot 2.
        let list = remove_quote(quotes(&[13000, 14000, 13000]), 2).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(
            list,
            vec![MerchantQuote::new(1, 13000), MerchantQuote::new(2, 13000)]
        );
    }

    #[test]
    fn test_remove_missing_slot_is_not_found() {
        assert!(matches!(
            remove_quote(quotes(&[13000]), 2),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_slots_stay_dense_across_mixed_operations() {
        let mut list = vec![];
        for price in [11000, 12000, 13000, 14000, 15000] {
            list = add_quote(list, price).unwrap();
        }
        list = remove_quote(list, 1).unwrap();
        list = remove_quote(list, 3).unwrap();
        list = add_quote(list, 16000).unwrap();
        list = remove_quote(list, 2).unwrap();

        assert_dense(&list);
        assert_eq!(
            list.iter().map(|q| q.price).collect::<Vec<_>>(),
            vec![12000, 15000, 16000]
        );
    }

    #[test]
    fn test_renumber_is_idempotent() {
        let list = renumber(quotes(&[13000, 14000, 13000]));
        assert_eq!(renumber(list.clone()), list);
    }
}
