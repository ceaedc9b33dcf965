//! Leg Market Data Value Object

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MarketSize, MarketValue};

/// Screen market for a single option leg.
///
/// Each side is independently available or not: a one-sided market keeps
/// its good side instead of degrading to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegMarketData {
    /// Best bid.
    pub bid: MarketValue,
    /// Best offer.
    pub offer: MarketValue,
    /// Size behind the bid.
    pub bid_size: MarketSize,
    /// Size behind the offer.
    pub offer_size: MarketSize,
}

impl LegMarketData {
    /// Create leg market data from explicit sides.
    #[must_use]
    pub const fn new(
        bid: MarketValue,
        offer: MarketValue,
        bid_size: MarketSize,
        offer_size: MarketSize,
    ) -> Self {
        Self {
            bid,
            offer,
            bid_size,
            offer_size,
        }
    }

    /// A fully unavailable quote (fetch failed, market closed, bad ticker).
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            bid: MarketValue::Unavailable,
            offer: MarketValue::Unavailable,
            bid_size: MarketSize::Unavailable,
            offer_size: MarketSize::Unavailable,
        }
    }

    /// Two-sided quote with sizes.
    #[must_use]
    pub fn two_sided(bid: Decimal, offer: Decimal, bid_size: u64, offer_size: u64) -> Self {
        Self {
            bid: MarketValue::Value(bid),
            offer: MarketValue::Value(offer),
            bid_size: MarketSize::Value(bid_size),
            offer_size: MarketSize::Value(offer_size),
        }
    }

    /// Midpoint, available only when both sides are.
    #[must_use]
    pub fn mid(&self) -> MarketValue {
        self.bid
            .zip_with(self.offer, |b, o| (b + o) / Decimal::TWO)
    }

    /// Mid for display: the midpoint when two-sided, the one good side of
    /// a one-sided market, unavailable otherwise.
    #[must_use]
    pub fn display_mid(&self) -> MarketValue {
        match (self.bid, self.offer) {
            (MarketValue::Value(b), MarketValue::Value(o)) => {
                MarketValue::Value((b + o) / Decimal::TWO)
            }
            (MarketValue::Value(b), MarketValue::Unavailable) => MarketValue::Value(b),
            (MarketValue::Unavailable, MarketValue::Value(o)) => MarketValue::Value(o),
            (MarketValue::Unavailable, MarketValue::Unavailable) => MarketValue::Unavailable,
        }
    }

    /// True when neither side has a quote.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        !self.bid.is_available() && !self.offer.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn mid_needs_both_sides() {
        let quote = LegMarketData::two_sided(dec!(1.00), dec!(1.50), 100, 200);
        assert_eq!(quote.mid(), MarketValue::Value(dec!(1.25)));

        let one_sided = LegMarketData {
            offer: MarketValue::Unavailable,
            ..quote
        };
        assert_eq!(one_sided.mid(), MarketValue::Unavailable);
    }

    #[test]
    fn display_mid_falls_back_to_good_side() {
        let one_sided = LegMarketData {
            bid: MarketValue::Unavailable,
            offer: MarketValue::Value(dec!(2.00)),
            bid_size: MarketSize::Unavailable,
            offer_size: MarketSize::Value(50),
        };
        assert_eq!(one_sided.display_mid(), MarketValue::Value(dec!(2.00)));
        assert_eq!(
            LegMarketData::unavailable().display_mid(),
            MarketValue::Unavailable
        );
    }

    #[test]
    fn unavailable_predicate() {
        assert!(LegMarketData::unavailable().is_unavailable());
        assert!(!LegMarketData::two_sided(dec!(1), dec!(2), 1, 1).is_unavailable());
    }

    #[test]
    fn serde_round_trip() {
        let quote = LegMarketData::two_sided(dec!(0.41), dec!(0.47), 1058, 600);
        let json = serde_json::to_string(&quote).unwrap();
        let parsed: LegMarketData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, quote);
    }
}
