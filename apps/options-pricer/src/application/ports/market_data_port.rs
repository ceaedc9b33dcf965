//! Market Data Port (Driven Port)
//!
//! Interface for the external market-data collaborator. The core never
//! assumes a particular source; the mock adapter and any live feed
//! implement the same contract, including the failure side of it — a
//! failed fetch is an error here and becomes "unavailable" downstream,
//! never a zero.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::quoting::LegMarketData;
use crate::domain::structure::OptionRight;

/// Market data error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarketDataError {
    /// Connection error.
    #[error("market data connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Symbol not found.
    #[error("symbol not found: {symbol}")]
    SymbolNotFound {
        /// The unknown symbol.
        symbol: String,
    },

    /// Data unavailable.
    #[error("market data unavailable: {message}")]
    DataUnavailable {
        /// Error details.
        message: String,
    },

    /// API error.
    #[error("market data API error: {message}")]
    ApiError {
        /// Error details.
        message: String,
    },
}

/// Port for fetching market data from external providers.
///
/// This is a driven (secondary/outbound) port; the infrastructure layer
/// provides implementations. It is the only suspension point in the
/// pricing path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Current spot price for an underlying.
    async fn spot(&self, underlying: &str) -> Result<Decimal, MarketDataError>;

    /// Screen quote for a single option.
    async fn option_quote(
        &self,
        underlying: &str,
        expiry: NaiveDate,
        strike: Decimal,
        right: OptionRight,
    ) -> Result<LegMarketData, MarketDataError>;

    /// Contract multiplier for an underlying.
    async fn contract_multiplier(&self, underlying: &str) -> Result<u32, MarketDataError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MarketDataError::SymbolNotFound {
            symbol: "XXXX".to_string(),
        };
        assert_eq!(err.to_string(), "symbol not found: XXXX");

        let err = MarketDataError::DataUnavailable {
            message: "market closed".to_string(),
        };
        assert_eq!(err.to_string(), "market data unavailable: market closed");
    }
}
