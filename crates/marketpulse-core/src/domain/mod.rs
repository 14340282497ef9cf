mod date;
mod series;
mod symbol;

pub use date::TradingDate;
pub use series::{CanonicalSeries, PriceRow};
pub use symbol::Symbol;
