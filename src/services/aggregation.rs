use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{ComparisonRow, MerchantQuote, Page, PriceRecord, WorksheetRow, PAGE_SIZES};

/// Mean of all quote prices, rounded half-up to the nearest rupiah. `None`
/// for an empty list: callers keep whatever explicit average is stored
/// instead of zeroing it out.
pub fn recompute_average(quotes: &[MerchantQuote]) -> Option<i64> {
    if quotes.is_empty() {
        return None;
    }
    let sum: i64 = quotes.iter().map(|q| q.price).sum();
    Some((sum as f64 / quotes.len() as f64).round() as i64)
}

/// One worksheet row per commodity present in the (date, market) record set,
/// keyed by commodity id. A commodity without a record is omitted, never
/// shown as a zero row. Duplicate records for a key collapse to the last one
/// encountered.
pub fn build_market_worksheet(records: &[PriceRecord]) -> Vec<WorksheetRow> {
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    let mut rows: Vec<WorksheetRow> = Vec::new();

    for record in records {
        let row = WorksheetRow {
            record_id: record.id,
            commodity_id: record.commodity_id,
            commodity_name: record.commodity.0.name.clone(),
            unit: record.commodity.0.unit.clone(),
            merchant_prices: record.merchant_prices.0.clone(),
            avg_today: record.avg_today,
            avg_yesterday: record.avg_yesterday,
            notes: record.notes.clone(),
        };
        match index.get(&record.commodity_id) {
            Some(&i) => rows[i] = row,
            None => {
                index.insert(record.commodity_id, rows.len());
                rows.push(row);
            }
        }
    }

    rows
}

/// Case-insensitive substring filter on commodity name.
pub fn filter_worksheet(rows: Vec<WorksheetRow>, search: Option<&str>) -> Vec<WorksheetRow> {
    match search.map(str::to_lowercase).filter(|s| !s.is_empty()) {
        Some(term) => rows
            .into_iter()
            .filter(|r| r.commodity_name.to_lowercase().contains(&term))
            .collect(),
        None => rows,
    }
}

/// Optional market narrowing, applied before cross-market grouping so a
/// narrowed table still numbers its groups from "001".
pub fn narrow_to_market(records: Vec<PriceRecord>, market: Option<&str>) -> Vec<PriceRecord> {
    match market.filter(|m| !m.trim().is_empty()) {
        Some(m) => records.into_iter().filter(|r| r.market == m).collect(),
        None => records,
    }
}

/// Groups records by (date, commodity) regardless of market and assigns each
/// group a sequential zero-padded display number in encounter order.
pub fn build_cross_market_table(records: &[PriceRecord]) -> Vec<ComparisonRow> {
    let mut index: HashMap<(NaiveDate, Uuid), usize> = HashMap::new();
    let mut rows: Vec<ComparisonRow> = Vec::new();

    for record in records {
        let key = (record.date, record.commodity_id);
        let i = match index.get(&key) {
            Some(&i) => i,
            None => {
                rows.push(ComparisonRow {
                    no: format!("{:03}", rows.len() + 1),
                    date: record.date,
                    commodity_id: record.commodity_id,
                    commodity_name: record.commodity.0.name.clone(),
                    unit: record.commodity.0.unit.clone(),
                    market_prices: HashMap::new(),
                    // The group surfaces the first encountered record's stored
                    // averages rather than re-averaging across markets.
                    // Observed product behavior, kept as-is.
                    avg_yesterday: record.avg_yesterday,
                    avg_today: record.avg_today,
                });
                index.insert(key, rows.len() - 1);
                rows.len() - 1
            }
        };
        rows[i]
            .market_prices
            .insert(record.market.clone(), record.avg_today);
    }

    rows
}

/// Search (name or zero-padded number, case-insensitive) and optional date
/// filter, applied after grouping and before pagination.
pub fn filter_comparison(
    rows: Vec<ComparisonRow>,
    search: Option<&str>,
    date: Option<NaiveDate>,
) -> Vec<ComparisonRow> {
    let term = search.map(str::to_lowercase).filter(|s| !s.is_empty());
    rows.into_iter()
        .filter(|r| match &term {
            Some(t) => {
                r.commodity_name.to_lowercase().contains(t) || r.no.to_lowercase().contains(t)
            }
            None => true,
        })
        .filter(|r| match date {
            Some(d) => r.date == d,
            None => true,
        })
        .collect()
}

/// Fixed page sizes (10/20/50); the page index clamps to the valid range so
/// a stale page number after filtering still yields a page.
pub fn paginate<T>(rows: Vec<T>, page: usize, page_size: usize) -> Result<Page<T>, AppError> {
    if !PAGE_SIZES.contains(&page_size) {
        return Err(AppError::Validation(format!(
            "Page size must be one of {:?}",
            PAGE_SIZES
        )));
    }

    let total = rows.len();
    let total_pages = std::cmp::max(1, total.div_ceil(page_size));
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let rows: Vec<T> = rows
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    Ok(Page {
        rows,
        total,
        page,
        page_size,
        total_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommoditySnapshot;
    use sqlx::types::Json;

    fn quote_list(prices: &[i64]) -> Vec<MerchantQuote> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| MerchantQuote::new(i as u32 + 1, p))
            .collect()
    }

    fn record(
        date: &str,
        market: &str,
        commodity_id: Uuid,
        name: &str,
        prices: &[i64],
        avg_today: i64,
        avg_yesterday: i64,
    ) -> PriceRecord {
        let now = chrono::Utc::now();
        PriceRecord {
            id: Uuid::new_v4(),
            date: date.parse().unwrap(),
            market: market.to_string(),
            commodity_id,
            commodity: Json(CommoditySnapshot {
                id: commodity_id,
                name: name.to_string(),
                unit: "Kg".to_string(),
            }),
            merchant_prices: Json(quote_list(prices)),
            avg_today,
            avg_yesterday,
            notes: "-".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_average_rounds_half_up() {
        // round(40000 / 3) = 13333
        let avg = recompute_average(&quote_list(&[13000, 14000, 13000]));
        assert_eq!(avg, Some(13333));

        // 0.5 rounds up
        let avg = recompute_average(&quote_list(&[13000, 13001]));
        assert_eq!(avg, Some(13001));
    }

    #[test]
    fn test_average_of_empty_list_is_unchanged_signal() {
        assert_eq!(recompute_average(&[]), None);
        // Callers keep an explicit value instead of zeroing it out.
        let stored_avg = 15000i64;
        let effective = recompute_average(&[]).unwrap_or(stored_avg);
        assert_eq!(effective, 15000);
    }

    #[test]
    fn test_worksheet_omits_commodities_without_records() {
        let beras = Uuid::new_v4();
        let records = vec![record(
            "2026-08-17",
            "Pasar Baru",
            beras,
            "Beras Cap C4 (Medium)",
            &[13000, 14000],
            13500,
            13400,
        )];

        let rows = build_market_worksheet(&records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].commodity_id, beras);
        // No zero-filled placeholder rows for anything else.
    }

    #[test]
    fn test_worksheet_dedups_by_commodity_key_last_wins() {
        let beras = Uuid::new_v4();
        let records = vec![
            record("2026-08-17", "Pasar Baru", beras, "Beras", &[13000], 13000, 0),
            record("2026-08-17", "Pasar Baru", beras, "Beras", &[14000], 14000, 0),
        ];

        let rows = build_market_worksheet(&records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].avg_today, 14000);
    }

    #[test]
    fn test_cross_market_numbers_are_sequential_and_zero_padded() {
        let beras = Uuid::new_v4();
        let gula = Uuid::new_v4();
        let records = vec![
            record("2026-08-17", "Pasar Baru", beras, "Beras", &[13000], 13000, 12900),
            record("2026-08-17", "Pasar Lama", beras, "Beras", &[13500], 13500, 13300),
            record("2026-08-17", "Pasar Baru", gula, "Gula Pasir", &[18000], 18000, 17500),
        ];

        let rows = build_cross_market_table(&records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].no, "001");
        assert_eq!(rows[1].no, "002");
        assert_eq!(rows[0].market_prices.get("Pasar Baru"), Some(&13000));
        assert_eq!(rows[0].market_prices.get("Pasar Lama"), Some(&13500));
        assert_eq!(rows[1].market_prices.get("Pasar Lama"), None);
    }

    #[test]
    fn test_cross_market_group_surfaces_first_records_averages() {
        let beras = Uuid::new_v4();
        let records = vec![
            record("2026-08-17", "Pasar Baru", beras, "Beras", &[13000], 13000, 12900),
            record("2026-08-17", "Pasar Lama", beras, "Beras", &[15000], 15000, 14800),
        ];

        let rows = build_cross_market_table(&records);
        assert_eq!(rows[0].avg_today, 13000);
        assert_eq!(rows[0].avg_yesterday, 12900);
    }

    #[test]
    fn test_market_narrowing_limits_comparison_columns() {
        let beras = Uuid::new_v4();
        let records = vec![
            record("2026-08-17", "Pasar Baru", beras, "Beras", &[13000], 13000, 12900),
            record("2026-08-17", "Pasar Lama", beras, "Beras", &[13500], 13500, 13300),
        ];

        let narrowed = narrow_to_market(records.clone(), Some("Pasar Lama"));
        let rows = build_cross_market_table(&narrowed);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].no, "001");
        assert_eq!(rows[0].market_prices.get("Pasar Lama"), Some(&13500));
        assert_eq!(rows[0].market_prices.get("Pasar Baru"), None);
        // Narrowed groups surface the narrowed set's first record.
        assert_eq!(rows[0].avg_today, 13500);

        // Blank narrows to nothing, i.e. all markets stay.
        assert_eq!(narrow_to_market(records.clone(), Some("  ")).len(), 2);
        assert_eq!(narrow_to_market(records, None).len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = vec![
            record(
                "2026-08-17",
                "Pasar Baru",
                Uuid::new_v4(),
                "Beras Cap C4 (Medium)",
                &[13000],
                13000,
                0,
            ),
            record(
                "2026-08-17",
                "Pasar Baru",
                Uuid::new_v4(),
                "Gula Pasir",
                &[18000],
                18000,
                0,
            ),
        ];

        let rows = build_cross_market_table(&records);
        let hits = filter_comparison(rows, Some("beras"), None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].commodity_name, "Beras Cap C4 (Medium)");
    }

    #[test]
    fn test_search_matches_display_number() {
        let records = vec![
            record("2026-08-17", "Pasar Baru", Uuid::new_v4(), "Beras", &[13000], 13000, 0),
            record("2026-08-17", "Pasar Baru", Uuid::new_v4(), "Gula", &[18000], 18000, 0),
        ];

        let rows = build_cross_market_table(&records);
        let hits = filter_comparison(rows, Some("002"), None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].commodity_name, "Gula");
    }

    #[test]
    fn test_date_filter_applies_after_grouping() {
        let beras = Uuid::new_v4();
        let records = vec![
            record("2026-08-17", "Pasar Baru", beras, "Beras", &[13000], 13000, 0),
            record("2026-08-16", "Pasar Baru", beras, "Beras", &[12800], 12800, 0),
        ];

        let rows = build_cross_market_table(&records);
        assert_eq!(rows.len(), 2); // distinct (date, commodity) groups
        let hits = filter_comparison(rows, None, Some("2026-08-16".parse().unwrap()));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].avg_today, 12800);
    }

    #[test]
    fn test_paginate_clamps_page_into_range() {
        let rows: Vec<i32> = (0..25).collect();

        let page = paginate(rows.clone(), 99, 10).unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(page.rows, vec![20, 21, 22, 23, 24]);
        assert_eq!(page.total_pages, 3);

        let page = paginate(rows.clone(), 0, 10).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.rows.len(), 10);

        let page = paginate(Vec::<i32>::new(), 5, 20).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn test_paginate_rejects_unknown_page_size() {
        assert!(matches!(
            paginate(vec![1, 2, 3], 1, 15),
            Err(AppError::Validation(_))
        ));
    }
}
