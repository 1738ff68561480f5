use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{error, info};

use crate::db;
use crate::errors::AppError;
use crate::models::{ComparisonRow, Page, ViewQuery, WorksheetRow};
use crate::services::auth::CurrentUser;
use crate::services::export::{self, ComparisonFilters, Sheet};
use crate::services::aggregation;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/worksheet", get(worksheet_view))
        .route("/worksheet/export", get(worksheet_export))
        .route("/comparison", get(comparison_view))
        .route("/comparison/export", get(comparison_export))
}

#[derive(Debug, Deserialize)]
pub struct WorksheetParams {
    pub market: Option<String>,
    pub date: NaiveDate,
    pub search: Option<String>,
}

/// Per-market daily worksheet ("Data Perpasar"), one row per commodity with
/// data for the chosen date.
pub async fn worksheet_view(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(params): Query<WorksheetParams>,
) -> Result<Json<Vec<WorksheetRow>>, AppError> {
    info!("GET /reports/worksheet - date {}", params.date);
    let market = current.resolve_market(params.market)?;
    let records =
        db::price_record_queries::fetch_by_date_and_market(&state.pool, params.date, &market)
            .await?;
    let rows = aggregation::filter_worksheet(
        aggregation::build_market_worksheet(&records),
        params.search.as_deref(),
    );
    Ok(Json(rows))
}

pub async fn worksheet_export(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(params): Query<WorksheetParams>,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    info!("GET /reports/worksheet/export - date {}", params.date);
    let market = current.resolve_market(params.market)?;
    let records =
        db::price_record_queries::fetch_by_date_and_market(&state.pool, params.date, &market)
            .await?;
    let rows = aggregation::filter_worksheet(
        aggregation::build_market_worksheet(&records),
        params.search.as_deref(),
    );
    let sheet = export::worksheet_sheet(&rows, &market, params.date);
    csv_response(&sheet)
}

/// Cross-market comparison ("Data Pedagang"): one row per (date, commodity)
/// group with each market's stored average for that day.
pub async fn comparison_view(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<ViewQuery>,
) -> Result<Json<Page<ComparisonRow>>, AppError> {
    info!("GET /reports/comparison - Fetching comparison table");
    current.require_admin()?;
    let records =
        db::price_record_queries::fetch_filtered(&state.pool, None, None, None).await?;
    let records = aggregation::narrow_to_market(records, query.market.as_deref());
    let rows = aggregation::filter_comparison(
        aggregation::build_cross_market_table(&records),
        query.search.as_deref(),
        query.date,
    );
    let page = aggregation::paginate(rows, query.page(), query.page_size())?;
    Ok(Json(page))
}

pub async fn comparison_export(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<ViewQuery>,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    info!("GET /reports/comparison/export - Exporting comparison table");
    current.require_admin()?;
    let records =
        db::price_record_queries::fetch_filtered(&state.pool, None, None, None).await?;
    let markets = db::market_queries::fetch_all(&state.pool).await?;
    // Export takes the whole filtered set, not the current page.
    let records = aggregation::narrow_to_market(records, query.market.as_deref());
    let rows = aggregation::filter_comparison(
        aggregation::build_cross_market_table(&records),
        query.search.as_deref(),
        query.date,
    );
    let filters = ComparisonFilters {
        search: query.search.clone(),
        date: query.date,
    };
    let sheet = export::comparison_sheet(
        &rows,
        &markets,
        &filters,
        chrono::Utc::now().date_naive(),
    );
    csv_response(&sheet)
}

fn csv_response(sheet: &Sheet) -> Result<(HeaderMap, Vec<u8>), AppError> {
    let bytes = sheet.to_csv_bytes().map_err(|e| {
        error!("Failed to serialize {}: {}", sheet.file_name, e);
        AppError::Validation(format!("Failed to build export: {}", e))
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    let disposition = format!("attachment; filename=\"{}\"", sheet.file_name);
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|_| AppError::Validation("Invalid export file name".into()))?,
    );
    Ok((headers, bytes))
}
