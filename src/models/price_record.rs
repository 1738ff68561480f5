use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// One merchant's price quote inside a price record. Slots are 1-based and
/// dense; the display name is always derived from the slot, so names must
/// never be treated as stable identifiers across removals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantQuote {
    pub slot: u32,
    pub name: String,
    pub price: i64,
}

impl MerchantQuote {
    pub fn display_name(slot: u32) -> String {
        format!("Pedagang {}", slot)
    }

    pub fn new(slot: u32, price: i64) -> Self {
        Self {
            slot,
            name: Self::display_name(slot),
            price,
        }
    }
}

// Denormalized commodity snapshot carried on each record, so historical rows
// keep the name/unit they were entered with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommoditySnapshot {
    pub id: uuid::Uuid,
    pub name: String,
    pub unit: String,
}

/// One commodity's prices at one market on one calendar day. At most one
/// record should exist per (date, market, commodity_id) key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PriceRecord {
    pub id: uuid::Uuid,
    pub date: chrono::NaiveDate,
    pub market: String,
    pub commodity_id: uuid::Uuid,
    pub commodity: Json<CommoditySnapshot>,
    pub merchant_prices: Json<Vec<MerchantQuote>>,
    pub avg_today: i64,
    pub avg_yesterday: i64,
    pub notes: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePriceRecord {
    pub date: chrono::NaiveDate,
    pub market: Option<String>,
    pub commodity_id: uuid::Uuid,
    pub merchant_prices: Vec<i64>,
    pub avg_today: Option<i64>,
    pub avg_yesterday: Option<i64>,
    pub notes: Option<String>,
}

/// Quote list and its derived average are always written together.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateQuotesAndAverage {
    pub merchant_prices: Vec<MerchantQuote>,
    pub avg_today: i64,
}

/// Officer-editable fields outside the quote list; also one atomic group.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateNoteAndAverages {
    pub avg_today: i64,
    pub avg_yesterday: i64,
    pub notes: String,
}
