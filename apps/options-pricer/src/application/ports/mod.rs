//! Application ports.

pub mod market_data_port;

pub use market_data_port::{MarketDataError, MarketDataPort};
