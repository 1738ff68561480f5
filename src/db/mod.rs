pub mod commodity_queries;
pub mod market_queries;
pub mod price_record_queries;
pub mod unit_queries;
pub mod user_queries;
