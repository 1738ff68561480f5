use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::MerchantQuote;

pub const PAGE_SIZES: [usize; 3] = [10, 20, 50];

/// Explicit query state for the two report views. Carried as a value instead
/// of ambient UI state so aggregation stays pure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewQuery {
    pub date: Option<chrono::NaiveDate>,
    pub market: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ViewQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(PAGE_SIZES[0])
    }
}

/// One row of the per-market daily worksheet, keyed by commodity.
#[derive(Debug, Clone, Serialize)]
pub struct WorksheetRow {
    pub record_id: uuid::Uuid,
    pub commodity_id: uuid::Uuid,
    pub commodity_name: String,
    pub unit: String,
    pub merchant_prices: Vec<MerchantQuote>,
    pub avg_today: i64,
    pub avg_yesterday: i64,
    pub notes: String,
}

/// One row of the cross-market comparison table: one (date, commodity)
/// group with the avg_today of each market that reported.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    /// Zero-padded 3-digit display number, 1-based in encounter order.
    /// Not stable across reloads.
    pub no: String,
    pub date: chrono::NaiveDate,
    pub commodity_id: uuid::Uuid,
    pub commodity_name: String,
    pub unit: String,
    pub market_prices: HashMap<String, i64>,
    pub avg_yesterday: i64,
    pub avg_today: i64,
}

/// A filtered, paginated slice of rows plus the numbers the UI needs to
/// render a pager.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}
