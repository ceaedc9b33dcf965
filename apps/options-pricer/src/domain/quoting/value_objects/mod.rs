//! Value objects for the quoting context.

mod leg_market_data;
mod market_value;
mod structure_market_data;

pub use leg_market_data::LegMarketData;
pub use market_value::{MarketSize, MarketValue};
pub use structure_market_data::StructureMarketData;
