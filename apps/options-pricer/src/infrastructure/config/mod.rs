//! Configuration
//!
//! The live-vs-mock data source selection is an explicit value threaded
//! into adapter construction, never a process-global toggle. Mock quote
//! synthesis parameters are configuration too: the synthetic spread is a
//! visible design knob, not a constant buried in the adapter.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Which market-data source to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Synthetic quotes from the Black-Scholes mock.
    #[default]
    Mock,
    /// A live market-data feed.
    Live,
}

/// Parameters for mock quote synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockQuoteConfig {
    /// Synthetic spread as a fraction of theoretical value.
    pub spread_frac: Decimal,
    /// Floor on the synthetic spread (ticks wide even for cheap options).
    pub min_spread: Decimal,
    /// Size shown on both sides of synthetic quotes.
    pub default_size: u64,
}

impl Default for MockQuoteConfig {
    fn default() -> Self {
        Self {
            spread_frac: dec!(0.04),
            min_spread: dec!(0.05),
            default_size: 500,
        }
    }
}

/// Data-source configuration for the pricing core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataSourceConfig {
    /// Selected source.
    pub source: DataSource,
    /// Mock synthesis parameters (used when `source` is `Mock`).
    pub mock_quotes: MockQuoteConfig,
}

impl DataSourceConfig {
    /// Read configuration from environment variables.
    ///
    /// - `PRICER_DATA_SOURCE`: "mock" (default) or "live"
    /// - `PRICER_MOCK_SPREAD_FRAC`, `PRICER_MOCK_MIN_SPREAD`,
    ///   `PRICER_MOCK_DEFAULT_SIZE`: mock synthesis overrides
    #[must_use]
    pub fn from_env() -> Self {
        let source = std::env::var("PRICER_DATA_SOURCE")
            .map(|v| {
                if v.eq_ignore_ascii_case("live") {
                    DataSource::Live
                } else {
                    DataSource::Mock
                }
            })
            .unwrap_or_default();

        let defaults = MockQuoteConfig::default();
        let decimal_var = |name: &str, fallback: Decimal| {
            std::env::var(name)
                .ok()
                .and_then(|v| Decimal::from_str(&v).ok())
                .unwrap_or(fallback)
        };
        let mock_quotes = MockQuoteConfig {
            spread_frac: decimal_var("PRICER_MOCK_SPREAD_FRAC", defaults.spread_frac),
            min_spread: decimal_var("PRICER_MOCK_MIN_SPREAD", defaults.min_spread),
            default_size: std::env::var("PRICER_MOCK_DEFAULT_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_size),
        };

        Self {
            source,
            mock_quotes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_source_is_mock() {
        assert_eq!(DataSourceConfig::default().source, DataSource::Mock);
    }

    #[test]
    fn default_mock_quote_parameters() {
        let config = MockQuoteConfig::default();
        assert_eq!(config.spread_frac, dec!(0.04));
        assert_eq!(config.min_spread, dec!(0.05));
        assert_eq!(config.default_size, 500);
    }

    #[test]
    fn data_source_serde() {
        assert_eq!(serde_json::to_string(&DataSource::Live).unwrap(), "\"live\"");
        assert_eq!(
            serde_json::from_str::<DataSource>("\"mock\"").unwrap(),
            DataSource::Mock
        );
    }
}
