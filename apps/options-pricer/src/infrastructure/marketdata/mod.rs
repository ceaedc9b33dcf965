//! Market data adapters.

mod mock;

use std::sync::Arc;

use crate::application::ports::MarketDataPort;
use crate::infrastructure::config::{DataSource, DataSourceConfig};

pub use mock::MockMarketData;

/// Construct the market-data source selected by configuration.
///
/// The toggle is threaded in here explicitly; nothing global. A live
/// adapter belongs to the excluded transport layer, so selecting `Live`
/// without one wired in falls back to the mock, loudly.
#[must_use]
pub fn create_market_data(config: &DataSourceConfig) -> Arc<dyn MarketDataPort> {
    match config.source {
        DataSource::Mock => Arc::new(MockMarketData::new(config.mock_quotes)),
        DataSource::Live => {
            tracing::warn!("no live market-data adapter wired in, falling back to mock");
            Arc::new(MockMarketData::new(config.mock_quotes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn factory_builds_a_working_source() {
        let source = create_market_data(&DataSourceConfig::default());
        assert_eq!(source.spot("AAPL").await.unwrap(), dec!(185.50));
    }

    #[tokio::test]
    async fn live_without_adapter_falls_back_to_mock() {
        let config = DataSourceConfig {
            source: DataSource::Live,
            ..Default::default()
        };
        let source = create_market_data(&config);
        assert!(source.spot("SPY").await.is_ok());
    }
}
