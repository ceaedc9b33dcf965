//! Market quoting bounded context.
//!
//! The "unavailable" sentinel types, per-leg and structure-level market
//! data, and the aggregation rules that combine signed leg quotes into a
//! structure bid/mid/offer.

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::AggregationError;
pub use services::aggregate_structure;
pub use value_objects::{LegMarketData, MarketSize, MarketValue, StructureMarketData};
