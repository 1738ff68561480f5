pub mod aggregation;
pub mod auth;
pub mod export;
pub mod quotes;
pub mod records;
pub mod units;
pub mod users;
