use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{auth, commodities, health, markets, price_records, reports, units, users};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/auth", auth::router())
        .nest("/api/markets", markets::router())
        .nest("/api/units", units::router())
        .nest("/api/commodities", commodities::router())
        .nest("/api/price-records", price_records::router())
        .nest("/api/reports", reports::router())
        .nest("/api/users", users::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
