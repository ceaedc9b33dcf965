//! Leg Quote Resolver
//!
//! Turns a market-data fetch into per-leg market data. The failure policy
//! lives here: a fetch error is absorbed into a fully-unavailable quote,
//! logged and passed along — one dark leg must never abort pricing of the
//! rest of the order.

use std::sync::Arc;

use crate::application::ports::MarketDataPort;
use crate::domain::quoting::LegMarketData;
use crate::domain::structure::OptionLeg;

/// Resolves one leg's screen quote through the market-data port.
#[derive(Clone)]
pub struct LegQuoteResolver {
    market_data: Arc<dyn MarketDataPort>,
}

impl LegQuoteResolver {
    /// Create a resolver over a market-data port.
    #[must_use]
    pub fn new(market_data: Arc<dyn MarketDataPort>) -> Self {
        Self { market_data }
    }

    /// Fetch the leg's quote; failures become "unavailable", never zero.
    pub async fn resolve(&self, underlying: &str, leg: &OptionLeg) -> LegMarketData {
        match self
            .market_data
            .option_quote(underlying, leg.expiry(), leg.strike(), leg.right())
            .await
        {
            Ok(quote) => quote,
            Err(error) => {
                tracing::warn!(
                    underlying,
                    strike = %leg.strike(),
                    expiry = %leg.expiry(),
                    %error,
                    "leg quote unavailable"
                );
                LegMarketData::unavailable()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::market_data_port::MockMarketDataPort;
    use crate::application::ports::MarketDataError;
    use crate::domain::quoting::{MarketSize, MarketValue};
    use crate::domain::structure::{OptionRight, PositionSide};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn leg() -> OptionLeg {
        OptionLeg::new(
            "Leg 1".to_string(),
            NaiveDate::from_ymd_opt(2026, 6, 16).unwrap(),
            dec!(45),
            OptionRight::Put,
            PositionSide::Long,
            dec!(1),
        )
    }

    #[tokio::test]
    async fn passes_quotes_through() {
        let mut port = MockMarketDataPort::new();
        port.expect_option_quote()
            .returning(|_, _, _, _| Ok(LegMarketData::two_sided(dec!(0.41), dec!(0.47), 100, 200)));

        let resolver = LegQuoteResolver::new(Arc::new(port));
        let quote = resolver.resolve("UBER", &leg()).await;

        assert_eq!(quote.bid, MarketValue::Value(dec!(0.41)));
        assert_eq!(quote.offer_size, MarketSize::Value(200));
    }

    #[tokio::test]
    async fn fetch_failure_becomes_unavailable() {
        let mut port = MockMarketDataPort::new();
        port.expect_option_quote().returning(|_, _, _, _| {
            Err(MarketDataError::DataUnavailable {
                message: "market closed".to_string(),
            })
        });

        let resolver = LegQuoteResolver::new(Arc::new(port));
        let quote = resolver.resolve("UBER", &leg()).await;

        assert_eq!(quote, LegMarketData::unavailable());
    }
}
