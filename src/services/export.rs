use anyhow::Result;
use chrono::NaiveDate;

use crate::models::{ComparisonRow, Market, WorksheetRow};
use crate::utils::{format_date_for_file_name, format_long_date_id, format_rupiah};

/// Export keeps at most this many merchant price columns; quotes beyond the
/// third stay in the data but are not emitted.
const EXPORT_MERCHANT_COLUMNS: usize = 3;

/// An in-memory sheet: rendered cells plus the column widths a spreadsheet
/// viewer would size to. Rows may have different lengths (title rows span).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub file_name: String,
    pub rows: Vec<Vec<String>>,
    pub col_widths: Vec<usize>,
}

impl Sheet {
    fn new(name: &str, file_name: String, rows: Vec<Vec<String>>) -> Self {
        let col_widths = auto_size(&rows);
        Self {
            name: name.to_string(),
            file_name,
            rows,
            col_widths,
        }
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        for row in &self.rows {
            if row.is_empty() {
                writer.write_record([""])?;
            } else {
                writer.write_record(row)?;
            }
        }
        writer.flush()?;
        writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("csv writer: {}", e))
    }
}

// Width of each column = character length of its longest rendered cell + 2.
fn auto_size(rows: &[Vec<String>]) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|row| row.get(c))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                + 2
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct ComparisonFilters {
    pub search: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Cross-market "Data Pedagang" sheet: title, blank row, a group header with
/// "Nama Pasar" spanning the market columns, a sub-header naming each market,
/// then one row per (date, commodity) group.
pub fn comparison_sheet(
    rows: &[ComparisonRow],
    markets: &[Market],
    filters: &ComparisonFilters,
    today: NaiveDate,
) -> Sheet {
    let mut group_header = vec![
        "No".to_string(),
        "Sub Variant".to_string(),
        "Satuan".to_string(),
    ];
    for (i, _) in markets.iter().enumerate() {
        group_header.push(if i == 0 { "Nama Pasar".to_string() } else { String::new() });
    }
    group_header.push("Harga Rata-rata Kemarin".to_string());
    group_header.push("Harga Rata-rata Hari ini".to_string());

    let mut sub_header = vec![String::new(), String::new(), String::new()];
    for market in markets {
        sub_header.push(market.name.clone());
    }
    sub_header.push(String::new());
    sub_header.push(String::new());

    let mut sheet_rows = vec![vec!["DATA PEDAGANG".to_string()], vec![], group_header, sub_header];

    for row in rows {
        let mut cells = vec![row.no.clone(), row.commodity_name.clone(), row.unit.clone()];
        for market in markets {
            cells.push(match row.market_prices.get(&market.name) {
                Some(price) => price.to_string(),
                None => "-".to_string(),
            });
        }
        cells.push(row.avg_yesterday.to_string());
        cells.push(row.avg_today.to_string());
        sheet_rows.push(cells);
    }

    Sheet::new(
        "Data Pedagang",
        comparison_file_name(filters, today),
        sheet_rows,
    )
}

fn comparison_file_name(filters: &ComparisonFilters, today: NaiveDate) -> String {
    let mut name = String::from("Data_Pedagang");
    if let Some(search) = filters.search.as_deref().filter(|s| !s.trim().is_empty()) {
        name.push('_');
        name.push_str(search.trim());
    }
    name.push('_');
    name.push_str(&format_date_for_file_name(filters.date.unwrap_or(today)));
    name.push_str(".csv");
    name
}

/// Per-market daily worksheet sheet: title, market and long-form date rows,
/// blank row, fixed header with exactly three merchant columns.
pub fn worksheet_sheet(rows: &[WorksheetRow], market: &str, date: NaiveDate) -> Sheet {
    let mut sheet_rows = vec![
        vec!["Kertas Kerja Pemantauan Harga Barang Kebutuhan Pokok".to_string()],
        vec![format!("Pasar: {}", market)],
        vec![format!("Tanggal: {}", format_long_date_id(date))],
        vec![],
        vec![
            "No".to_string(),
            "Variant".to_string(),
            "Satuan".to_string(),
            "Pedagang 1".to_string(),
            "Pedagang 2".to_string(),
            "Pedagang 3".to_string(),
            "Rata-rata Hari Ini".to_string(),
            "Rata-rata Kemarin".to_string(),
            "Keterangan".to_string(),
        ],
    ];

    for (i, row) in rows.iter().enumerate() {
        let mut cells = vec![
            (i + 1).to_string(),
            row.commodity_name.clone(),
            row.unit.clone(),
        ];
        for slot in 0..EXPORT_MERCHANT_COLUMNS {
            cells.push(match row.merchant_prices.get(slot) {
                Some(quote) => format_rupiah(quote.price),
                None => "-".to_string(),
            });
        }
        cells.push(format_rupiah(row.avg_today));
        cells.push(format_rupiah(row.avg_yesterday));
        cells.push(if row.notes.is_empty() {
            "-".to_string()
        } else {
            row.notes.clone()
        });
        sheet_rows.push(cells);
    }

    let file_name = format!(
        "Data_Pasar_{}_{}.csv",
        market,
        format_date_for_file_name(date)
    );
    Sheet::new("Data Perpasar", file_name, sheet_rows)
}
