mod commodity;
mod market;
mod price_record;
mod unit;
mod user;
mod view;

pub use commodity::{Commodity, CreateCommodity, UpdateCommodity};
pub use market::{CreateMarket, Market, UpdateMarket};
pub use price_record::{
    CommoditySnapshot, CreatePriceRecord, MerchantQuote, PriceRecord, UpdateNoteAndAverages,
    UpdateQuotesAndAverage,
};
pub use unit::{CreateUnit, Unit};
pub use user::{CreateUser, LoginRequest, LoginResponse, Role, UpdateUser, User, UserProfile};
pub use view::{ComparisonRow, Page, ViewQuery, WorksheetRow, PAGE_SIZES};
