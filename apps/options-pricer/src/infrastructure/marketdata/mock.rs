//! Mock Market Data Adapter
//!
//! Synthesizes screen quotes from Black-Scholes theoretical values when
//! no live feed is connected: a demo spot/vol universe, a put-skew bump,
//! and a configurable spread straddling the theoretical mid. The bid and
//! offer are never the same number — a synthetic market still looks like
//! a market.
//!
//! Satisfies the same failure contract as a live adapter: symbols marked
//! failing return errors, which the resolver turns into "unavailable".

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal_macros::dec;

use crate::application::ports::{MarketDataError, MarketDataPort};
use crate::domain::pricing::black_scholes;
use crate::domain::quoting::{LegMarketData, MarketSize, MarketValue};
use crate::domain::structure::OptionRight;
use crate::infrastructure::config::MockQuoteConfig;

/// Fallback spot for tickers outside the demo universe.
const DEFAULT_SPOT: Decimal = dec!(100);
/// Fallback vol for tickers outside the demo universe.
const DEFAULT_VOL: Decimal = dec!(0.25);
/// Flat risk-free rate for synthesis.
const MOCK_RATE: f64 = 0.05;
/// Minimum synthetic bid.
const MIN_BID: Decimal = dec!(0.01);

/// Mock market-data source with a demo universe and per-test overrides.
#[derive(Debug)]
pub struct MockMarketData {
    spots: RwLock<HashMap<String, Decimal>>,
    vols: RwLock<HashMap<String, Decimal>>,
    failing: RwLock<HashSet<String>>,
    valuation_date: NaiveDate,
    config: MockQuoteConfig,
}

impl Default for MockMarketData {
    fn default() -> Self {
        Self::new(MockQuoteConfig::default())
    }
}

impl MockMarketData {
    /// Create a mock with the demo universe and the given synthesis
    /// parameters.
    #[must_use]
    pub fn new(config: MockQuoteConfig) -> Self {
        let spots = [
            ("AAPL", dec!(185.50)),
            ("MSFT", dec!(415.20)),
            ("GOOGL", dec!(175.80)),
            ("AMZN", dec!(195.60)),
            ("TSLA", dec!(245.30)),
            ("SPY", dec!(520.40)),
            ("QQQ", dec!(445.10)),
            ("META", dec!(560.75)),
            ("NVDA", dec!(880.50)),
            ("IWM", dec!(205.60)),
        ];
        let vols = [
            ("AAPL", dec!(0.22)),
            ("MSFT", dec!(0.20)),
            ("GOOGL", dec!(0.25)),
            ("AMZN", dec!(0.28)),
            ("TSLA", dec!(0.45)),
            ("SPY", dec!(0.14)),
            ("QQQ", dec!(0.18)),
            ("META", dec!(0.32)),
            ("NVDA", dec!(0.42)),
            ("IWM", dec!(0.18)),
        ];
        Self {
            spots: RwLock::new(
                spots
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            ),
            vols: RwLock::new(vols.into_iter().map(|(k, v)| (k.to_string(), v)).collect()),
            failing: RwLock::new(HashSet::new()),
            valuation_date: Utc::now().date_naive(),
            config,
        }
    }

    /// Pin the valuation date (time-to-expiry reference) for tests.
    #[must_use]
    pub fn with_valuation_date(mut self, date: NaiveDate) -> Self {
        self.valuation_date = date;
        self
    }

    /// Override a spot price.
    pub fn set_spot(&self, underlying: &str, spot: Decimal) {
        self.spots
            .write()
            .unwrap()
            .insert(underlying.to_uppercase(), spot);
    }

    /// Override an implied vol.
    pub fn set_vol(&self, underlying: &str, vol: Decimal) {
        self.vols
            .write()
            .unwrap()
            .insert(underlying.to_uppercase(), vol);
    }

    /// Mark a symbol as failing: every fetch for it errors, exercising
    /// the unavailable path end to end.
    pub fn fail_symbol(&self, underlying: &str) {
        self.failing
            .write()
            .unwrap()
            .insert(underlying.to_uppercase());
    }

    fn check_failing(&self, underlying: &str) -> Result<(), MarketDataError> {
        if self.failing.read().unwrap().contains(&underlying.to_uppercase()) {
            return Err(MarketDataError::DataUnavailable {
                message: format!("no market data for {underlying}"),
            });
        }
        Ok(())
    }

    fn spot_for(&self, underlying: &str) -> Decimal {
        self.spots
            .read()
            .unwrap()
            .get(&underlying.to_uppercase())
            .copied()
            .unwrap_or(DEFAULT_SPOT)
    }

    /// Base vol plus a simple put skew: OTM puts trade over ATM vol.
    fn vol_for(&self, underlying: &str, strike: Decimal) -> Decimal {
        let base = self
            .vols
            .read()
            .unwrap()
            .get(&underlying.to_uppercase())
            .copied()
            .unwrap_or(DEFAULT_VOL);
        let spot = self.spot_for(underlying);
        let moneyness = strike / spot;
        if moneyness < Decimal::ONE {
            base + dec!(0.05) * (Decimal::ONE - moneyness)
        } else {
            base
        }
    }
}

#[async_trait]
impl MarketDataPort for MockMarketData {
    async fn spot(&self, underlying: &str) -> Result<Decimal, MarketDataError> {
        self.check_failing(underlying)?;
        Ok(self.spot_for(underlying))
    }

    async fn option_quote(
        &self,
        underlying: &str,
        expiry: NaiveDate,
        strike: Decimal,
        right: OptionRight,
    ) -> Result<LegMarketData, MarketDataError> {
        self.check_failing(underlying)?;

        let spot = self.spot_for(underlying);
        let vol = self.vol_for(underlying, strike);
        let days = (expiry - self.valuation_date).num_days().max(0);
        let time = days as f64 / 365.0;

        let theoretical = black_scholes::value(
            spot.to_f64().unwrap_or(0.0),
            strike.to_f64().unwrap_or(0.0),
            time,
            MOCK_RATE,
            0.0,
            vol.to_f64().unwrap_or(0.0),
            right,
        )
        .map_err(|e| MarketDataError::DataUnavailable {
            message: format!("synthesis failed for {underlying} {strike}{}: {e}", right.code()),
        })?;

        let mid = Decimal::from_f64(theoretical.price).unwrap_or(Decimal::ZERO);
        let half_spread = (self.config.spread_frac * mid / Decimal::TWO)
            .max(self.config.min_spread / Decimal::TWO);
        let bid = (mid - half_spread).round_dp(2).max(MIN_BID);
        let offer = (mid + half_spread).round_dp(2);

        Ok(LegMarketData::new(
            MarketValue::Value(bid),
            MarketValue::Value(offer),
            MarketSize::Value(self.config.default_size),
            MarketSize::Value(self.config.default_size),
        ))
    }

    async fn contract_multiplier(&self, underlying: &str) -> Result<u32, MarketDataError> {
        self.check_failing(underlying)?;
        Ok(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock() -> MockMarketData {
        MockMarketData::default()
            .with_valuation_date(NaiveDate::from_ymd_opt(2025, 11, 3).unwrap())
    }

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 16).unwrap()
    }

    #[tokio::test]
    async fn demo_universe_spot() {
        let mock = mock();
        assert_eq!(mock.spot("AAPL").await.unwrap(), dec!(185.50));
        // Unknown tickers fall back to the demo default.
        assert_eq!(mock.spot("ZZZZ").await.unwrap(), DEFAULT_SPOT);
    }

    #[tokio::test]
    async fn spot_override() {
        let mock = mock();
        mock.set_spot("AAPL", dec!(250));
        assert_eq!(mock.spot("AAPL").await.unwrap(), dec!(250));
    }

    #[tokio::test]
    async fn quote_straddles_theoretical_mid() {
        let mock = mock();
        let quote = mock
            .option_quote("AAPL", expiry(), dec!(185), OptionRight::Call)
            .await
            .unwrap();

        let bid = quote.bid.value().unwrap();
        let offer = quote.offer.value().unwrap();
        let theoretical = black_scholes::price(
            185.50,
            185.0,
            (expiry() - NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()).num_days() as f64 / 365.0,
            MOCK_RATE,
            0.0,
            0.22,
            OptionRight::Call,
        )
        .unwrap();
        let theoretical = Decimal::from_f64(theoretical).unwrap();

        assert!(bid < theoretical);
        assert!(offer > theoretical);
        // Not a degenerate single-price market.
        assert!(offer - bid >= dec!(0.05));
    }

    #[tokio::test]
    async fn cheap_option_keeps_minimum_spread_and_positive_bid() {
        let mock = mock();
        // Deep OTM put: tiny theoretical value.
        let quote = mock
            .option_quote("AAPL", expiry(), dec!(60), OptionRight::Put)
            .await
            .unwrap();

        let bid = quote.bid.value().unwrap();
        let offer = quote.offer.value().unwrap();
        assert!(bid >= MIN_BID);
        assert!(offer > bid);
    }

    #[tokio::test]
    async fn put_skew_raises_otm_put_vol() {
        let mock = mock();
        assert!(mock.vol_for("AAPL", dec!(150)) > mock.vol_for("AAPL", dec!(185.50)));
        assert_eq!(mock.vol_for("AAPL", dec!(200)), dec!(0.22));
    }

    #[tokio::test]
    async fn failing_symbol_errors_everywhere() {
        let mock = mock();
        mock.fail_symbol("UBER");

        assert!(mock.spot("UBER").await.is_err());
        assert!(
            mock.option_quote("UBER", expiry(), dec!(45), OptionRight::Put)
                .await
                .is_err()
        );
        assert!(mock.contract_multiplier("UBER").await.is_err());
    }

    #[tokio::test]
    async fn expired_option_quotes_intrinsic() {
        let mock = mock();
        mock.set_spot("AAPL", dec!(200));
        let quote = mock
            .option_quote(
                "AAPL",
                NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
                dec!(150),
                OptionRight::Call,
            )
            .await
            .unwrap();

        // T = 0: mid is intrinsic (50), spread still applied.
        let mid = quote.mid().value().unwrap();
        assert!((mid - dec!(50)).abs() <= dec!(0.01));
    }
}
