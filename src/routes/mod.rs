pub(crate) mod auth;
pub(crate) mod commodities;
pub(crate) mod health;
pub(crate) mod markets;
pub(crate) mod price_records;
pub(crate) mod reports;
pub(crate) mod units;
pub(crate) mod users;
