//! Structure Pricing Service
//!
//! The fetch-and-price orchestration: spot, one quote per leg, then a
//! single aggregation call over that snapshot. A structure's bid/offer is
//! always computed from one consistent set of leg quotes — the snapshot is
//! collected first and aggregated once, never mixed across refreshes.

use std::sync::Arc;

use crate::application::ports::MarketDataPort;
use crate::application::services::LegQuoteResolver;
use crate::domain::quoting::{
    AggregationError, LegMarketData, MarketValue, StructureMarketData, aggregate_structure,
};
use crate::domain::structure::{DEFAULT_MULTIPLIER, ParsedOrder};

/// A priced structure: the snapshot inputs plus the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedStructure {
    /// Live spot at pricing time, when the feed had one.
    pub spot: MarketValue,
    /// Contract multiplier.
    pub multiplier: u32,
    /// Per-leg screen quotes, one per structure leg, in leg order.
    pub leg_quotes: Vec<LegMarketData>,
    /// The structure-level aggregate.
    pub structure: StructureMarketData,
}

/// Prices parsed orders against a market-data port.
#[derive(Clone)]
pub struct StructurePricingService {
    market_data: Arc<dyn MarketDataPort>,
    resolver: LegQuoteResolver,
}

impl StructurePricingService {
    /// Create a pricing service over a market-data port.
    #[must_use]
    pub fn new(market_data: Arc<dyn MarketDataPort>) -> Self {
        let resolver = LegQuoteResolver::new(Arc::clone(&market_data));
        Self {
            market_data,
            resolver,
        }
    }

    /// Fetch market data for every leg and aggregate the structure.
    ///
    /// Spot and multiplier failures degrade (no tie adjustment, default
    /// multiplier) rather than aborting; per-leg failures surface as
    /// unavailable legs and invalidate the structure sides they touch.
    pub async fn price(&self, order: &ParsedOrder) -> Result<PricedStructure, AggregationError> {
        let underlying = order.structure.underlying.as_str();

        let spot = match self.market_data.spot(underlying).await {
            Ok(spot) => MarketValue::Value(spot),
            Err(error) => {
                tracing::warn!(underlying, %error, "spot unavailable");
                MarketValue::Unavailable
            }
        };

        let mut leg_quotes = Vec::with_capacity(order.structure.legs.len());
        for leg in &order.structure.legs {
            leg_quotes.push(self.resolver.resolve(underlying, leg).await);
        }

        let multiplier = match self.market_data.contract_multiplier(underlying).await {
            Ok(multiplier) => multiplier,
            Err(error) => {
                tracing::warn!(underlying, %error, "multiplier unavailable, using default");
                DEFAULT_MULTIPLIER
            }
        };

        let structure = aggregate_structure(&order.structure, &leg_quotes, spot)?;

        Ok(PricedStructure {
            spot,
            multiplier,
            leg_quotes,
            structure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MarketDataError;
    use crate::application::ports::market_data_port::MockMarketDataPort;
    use crate::domain::quoting::MarketSize;
    use crate::domain::shorthand::parse_order_at;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    fn put_spread_order() -> ParsedOrder {
        parse_order_at("AAPL Jun26 240/220 PS vs250 15d 500x", today()).unwrap()
    }

    #[tokio::test]
    async fn prices_from_one_snapshot() {
        let mut port = MockMarketDataPort::new();
        port.expect_spot().returning(|_| Ok(dec!(252)));
        port.expect_contract_multiplier().returning(|_| Ok(100));
        port.expect_option_quote()
            .returning(|_, _, strike, _| {
                if strike == dec!(240) {
                    Ok(LegMarketData::two_sided(dec!(10.00), dec!(10.50), 300, 400))
                } else {
                    Ok(LegMarketData::two_sided(dec!(4.00), dec!(4.40), 500, 200))
                }
            });

        let service = StructurePricingService::new(Arc::new(port));
        let priced = service.price(&put_spread_order()).await.unwrap();

        assert_eq!(priced.spot, MarketValue::Value(dec!(252)));
        assert_eq!(priced.multiplier, 100);
        assert_eq!(priced.leg_quotes.len(), 2);
        // bid 5.60, offer 6.50, tie adjustment -0.15 x 2 = -0.30
        assert_eq!(priced.structure.bid, MarketValue::Value(dec!(5.30)));
        assert_eq!(priced.structure.offer, MarketValue::Value(dec!(6.20)));
    }

    #[tokio::test]
    async fn one_failed_leg_leaves_others_displayed() {
        let mut port = MockMarketDataPort::new();
        port.expect_spot().returning(|_| Ok(dec!(252)));
        port.expect_contract_multiplier().returning(|_| Ok(100));
        port.expect_option_quote().returning(|_, _, strike, _| {
            if strike == dec!(240) {
                Ok(LegMarketData::two_sided(dec!(10.00), dec!(10.50), 300, 400))
            } else {
                Err(MarketDataError::DataUnavailable {
                    message: "no quote".to_string(),
                })
            }
        });

        let service = StructurePricingService::new(Arc::new(port));
        let priced = service.price(&put_spread_order()).await.unwrap();

        // The good leg keeps its quote for display.
        assert_eq!(priced.leg_quotes[0].bid, MarketValue::Value(dec!(10.00)));
        assert_eq!(priced.leg_quotes[1], LegMarketData::unavailable());
        // The structure aggregate is invalidated on both sides.
        assert_eq!(priced.structure.bid, MarketValue::Unavailable);
        assert_eq!(priced.structure.offer, MarketValue::Unavailable);
        assert_eq!(priced.structure.bid_size, MarketSize::Unavailable);
    }

    #[tokio::test]
    async fn spot_failure_skips_tie_adjustment() {
        let mut port = MockMarketDataPort::new();
        port.expect_spot().returning(|underlying: &str| {
            Err(MarketDataError::SymbolNotFound {
                symbol: underlying.to_string(),
            })
        });
        port.expect_contract_multiplier().returning(|_| Ok(100));
        port.expect_option_quote().returning(|_, _, strike, _| {
            if strike == dec!(240) {
                Ok(LegMarketData::two_sided(dec!(10.00), dec!(10.50), 300, 400))
            } else {
                Ok(LegMarketData::two_sided(dec!(4.00), dec!(4.40), 500, 200))
            }
        });

        let service = StructurePricingService::new(Arc::new(port));
        let priced = service.price(&put_spread_order()).await.unwrap();

        assert_eq!(priced.spot, MarketValue::Unavailable);
        // Untied sum: no 100.0-style spot stand-in sneaks into the price.
        assert_eq!(priced.structure.bid, MarketValue::Value(dec!(5.60)));
    }

    #[tokio::test]
    async fn multiplier_failure_defaults() {
        let mut port = MockMarketDataPort::new();
        port.expect_spot().returning(|_| Ok(dec!(100)));
        port.expect_contract_multiplier().returning(|underlying: &str| {
            Err(MarketDataError::ApiError {
                message: underlying.to_string(),
            })
        });
        port.expect_option_quote()
            .returning(|_, _, _, _| Ok(LegMarketData::two_sided(dec!(1), dec!(2), 10, 10)));

        let order = parse_order_at("UBER Jun26 45P", today()).unwrap();
        let service = StructurePricingService::new(Arc::new(port));
        let priced = service.price(&order).await.unwrap();

        assert_eq!(priced.multiplier, DEFAULT_MULTIPLIER);
    }
}
