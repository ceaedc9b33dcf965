//! Structure Aggregator
//!
//! Combines signed, ratio-weighted leg quotes into one structure-level
//! bid/mid/offer/size from a single consistent snapshot of leg market
//! data.
//!
//! Fill convention per leg with signed ratio `s`:
//!
//! - structure bid (screen pays): long legs sell at their bid, short legs
//!   buy back at their offer — `s > 0` contributes `s x bid`, `s < 0`
//!   contributes `s x offer`;
//! - structure offer (screen charges): the mirror image.
//!
//! Since every leg's bid <= offer, `offer - bid = sum(|s| x leg spread)`
//! is non-negative by construction — the invariant is never patched up
//! after the fact with `min`/`max`, which would destroy the sign of a
//! net-debit or crossed package.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::domain::quoting::errors::AggregationError;
use crate::domain::quoting::value_objects::{LegMarketData, MarketSize, MarketValue, StructureMarketData};
use crate::domain::structure::OptionStructure;

/// Aggregate leg quotes into a structure quote.
///
/// `spot` feeds the tie adjustment for orders quoted versus stock: when
/// the order carries a stock reference and delta and the spot is known,
/// `(delta / 100) x (spot - stock_ref)` shifts both sides.
///
/// Any side needing an unavailable leg input is unavailable; if every leg
/// is dark, so is the whole structure. Zero-quantity input (no legs)
/// aggregates to unavailable rather than a spurious zero.
pub fn aggregate_structure(
    structure: &OptionStructure,
    leg_quotes: &[LegMarketData],
    spot: MarketValue,
) -> Result<StructureMarketData, AggregationError> {
    if structure.legs.len() != leg_quotes.len() {
        return Err(AggregationError::LegCountMismatch {
            legs: structure.legs.len(),
            quotes: leg_quotes.len(),
        });
    }
    if structure.legs.is_empty() {
        return Ok(StructureMarketData::unavailable());
    }

    let mut bid = Some(Decimal::ZERO);
    let mut offer = Some(Decimal::ZERO);

    for (leg, quote) in structure.legs.iter().zip(leg_quotes) {
        let signed = leg.signed_ratio();
        let (bid_leg, offer_leg) = if signed > Decimal::ZERO {
            (quote.bid, quote.offer)
        } else {
            (quote.offer, quote.bid)
        };
        bid = bid.zip(bid_leg.value()).map(|(acc, v)| acc + signed * v);
        offer = offer.zip(offer_leg.value()).map(|(acc, v)| acc + signed * v);
    }

    // Tie adjustment for orders quoted versus a stock reference.
    if let (Some(stock_ref), Some(delta), MarketValue::Value(spot)) =
        (structure.stock_ref, structure.delta, spot)
    {
        let adjustment = delta / Decimal::ONE_HUNDRED * (spot - stock_ref);
        bid = bid.map(|b| b + adjustment);
        offer = offer.map(|o| o + adjustment);
    }

    let mid = bid
        .zip(offer)
        .map(|(b, o)| (b + o) / Decimal::TWO);

    let bid_size = side_size(structure, leg_quotes, Side::Bid);
    let offer_size = side_size(structure, leg_quotes, Side::Offer);

    Ok(StructureMarketData {
        bid: bid.into(),
        offer: offer.into(),
        mid: mid.into(),
        bid_size,
        offer_size,
    })
}

#[derive(Clone, Copy)]
enum Side {
    Bid,
    Offer,
}

/// Structures fillable against one side: the min over legs of that leg's
/// relevant size divided by its ratio, floored at the end. The relevant
/// size backs the same fill the price for that side assumed (bid side:
/// long legs' bid size, short legs' offer size).
fn side_size(
    structure: &OptionStructure,
    leg_quotes: &[LegMarketData],
    side: Side,
) -> MarketSize {
    let mut fillable: Option<Decimal> = None;

    for (leg, quote) in structure.legs.iter().zip(leg_quotes) {
        let long = leg.signed_ratio() > Decimal::ZERO;
        let size = match (side, long) {
            (Side::Bid, true) | (Side::Offer, false) => quote.bid_size,
            (Side::Bid, false) | (Side::Offer, true) => quote.offer_size,
        };
        let Some(size) = size.value() else {
            return MarketSize::Unavailable;
        };
        let per_leg = Decimal::from(size) / leg.ratio();
        fillable = Some(fillable.map_or(per_leg, |f| f.min(per_leg)));
    }

    fillable
        .and_then(|f| f.floor().to_u64())
        .map_or(MarketSize::Unavailable, MarketSize::Value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::structure::value_objects::{
        OptionLeg, OptionRight, PositionSide, StructureType,
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn leg(strike: Decimal, side: PositionSide, ratio: Decimal) -> OptionLeg {
        OptionLeg::new(
            "Leg".to_string(),
            NaiveDate::from_ymd_opt(2026, 6, 16).unwrap(),
            strike,
            OptionRight::Put,
            side,
            ratio,
        )
    }

    fn put_spread() -> OptionStructure {
        OptionStructure::new(
            "AAPL".to_string(),
            StructureType::PutSpread,
            vec![
                leg(dec!(240), PositionSide::Long, dec!(1)),
                leg(dec!(220), PositionSide::Short, dec!(1)),
            ],
        )
    }

    #[test]
    fn put_spread_two_sided() {
        let quotes = [
            LegMarketData::two_sided(dec!(10.00), dec!(10.50), 300, 400),
            LegMarketData::two_sided(dec!(4.00), dec!(4.40), 500, 200),
        ];
        let result =
            aggregate_structure(&put_spread(), &quotes, MarketValue::Unavailable).unwrap();

        // bid: +10.00 - 4.40 = 5.60; offer: +10.50 - 4.00 = 6.50
        assert_eq!(result.bid, MarketValue::Value(dec!(5.60)));
        assert_eq!(result.offer, MarketValue::Value(dec!(6.50)));
        assert_eq!(result.mid, MarketValue::Value(dec!(6.05)));
        // bid side: long leg's bid size (300) vs short leg's offer size (200)
        assert_eq!(result.bid_size, MarketSize::Value(200));
        // offer side: long leg's offer size (400) vs short leg's bid size (500)
        assert_eq!(result.offer_size, MarketSize::Value(400));
    }

    #[test]
    fn net_credit_stays_negative() {
        // Selling the expensive leg: structure trades at a negative price
        // and the sign must survive aggregation.
        let structure = OptionStructure::new(
            "AAPL".to_string(),
            StructureType::Custom,
            vec![
                leg(dec!(240), PositionSide::Short, dec!(1)),
                leg(dec!(220), PositionSide::Long, dec!(1)),
            ],
        );
        let quotes = [
            LegMarketData::two_sided(dec!(10.00), dec!(10.50), 100, 100),
            LegMarketData::two_sided(dec!(4.00), dec!(4.40), 100, 100),
        ];
        let result = aggregate_structure(&structure, &quotes, MarketValue::Unavailable).unwrap();

        assert_eq!(result.bid, MarketValue::Value(dec!(-6.50)));
        assert_eq!(result.offer, MarketValue::Value(dec!(-5.60)));
    }

    #[test]
    fn ratio_weighting() {
        let structure = OptionStructure::new(
            "AAPL".to_string(),
            StructureType::PutSpread,
            vec![
                leg(dec!(240), PositionSide::Long, dec!(1)),
                leg(dec!(220), PositionSide::Short, dec!(2)),
            ],
        );
        let quotes = [
            LegMarketData::two_sided(dec!(10.00), dec!(10.50), 300, 400),
            LegMarketData::two_sided(dec!(4.00), dec!(4.40), 500, 250),
        ];
        let result = aggregate_structure(&structure, &quotes, MarketValue::Unavailable).unwrap();

        // bid: +10.00 - 2 x 4.40 = 1.20; offer: +10.50 - 2 x 4.00 = 2.50
        assert_eq!(result.bid, MarketValue::Value(dec!(1.20)));
        assert_eq!(result.offer, MarketValue::Value(dec!(2.50)));
        // bid side: min(300 / 1, 250 / 2) = 125
        assert_eq!(result.bid_size, MarketSize::Value(125));
        // offer side: min(400 / 1, 500 / 2) = 250
        assert_eq!(result.offer_size, MarketSize::Value(250));
    }

    #[test]
    fn tie_adjustment_applies_to_both_sides() {
        let mut structure = put_spread();
        structure.stock_ref = Some(dec!(250));
        structure.delta = Some(dec!(-15));
        let quotes = [
            LegMarketData::two_sided(dec!(10.00), dec!(10.50), 100, 100),
            LegMarketData::two_sided(dec!(4.00), dec!(4.40), 100, 100),
        ];
        // spot 252, ref 250, delta -15: adjustment = -0.15 x 2 = -0.30
        let result =
            aggregate_structure(&structure, &quotes, MarketValue::Value(dec!(252))).unwrap();

        assert_eq!(result.bid, MarketValue::Value(dec!(5.30)));
        assert_eq!(result.offer, MarketValue::Value(dec!(6.20)));
    }

    #[test]
    fn no_tie_adjustment_without_spot() {
        let mut structure = put_spread();
        structure.stock_ref = Some(dec!(250));
        structure.delta = Some(dec!(-15));
        let quotes = [
            LegMarketData::two_sided(dec!(10.00), dec!(10.50), 100, 100),
            LegMarketData::two_sided(dec!(4.00), dec!(4.40), 100, 100),
        ];
        let result =
            aggregate_structure(&structure, &quotes, MarketValue::Unavailable).unwrap();

        assert_eq!(result.bid, MarketValue::Value(dec!(5.60)));
    }

    #[test]
    fn one_dark_leg_kills_both_sides() {
        let quotes = [
            LegMarketData::two_sided(dec!(10.00), dec!(10.50), 100, 100),
            LegMarketData::unavailable(),
        ];
        let result =
            aggregate_structure(&put_spread(), &quotes, MarketValue::Unavailable).unwrap();

        assert_eq!(result.bid, MarketValue::Unavailable);
        assert_eq!(result.offer, MarketValue::Unavailable);
        assert_eq!(result.mid, MarketValue::Unavailable);
        assert_eq!(result.bid_size, MarketSize::Unavailable);
        assert_eq!(result.offer_size, MarketSize::Unavailable);
    }

    #[test]
    fn one_sided_leg_kills_only_the_side_needing_it() {
        // Short leg with no offer: the structure bid needs that offer, the
        // structure offer only needs its bid.
        let quotes = [
            LegMarketData::two_sided(dec!(10.00), dec!(10.50), 100, 100),
            LegMarketData {
                bid: MarketValue::Value(dec!(4.00)),
                offer: MarketValue::Unavailable,
                bid_size: MarketSize::Value(50),
                offer_size: MarketSize::Unavailable,
            },
        ];
        let result =
            aggregate_structure(&put_spread(), &quotes, MarketValue::Unavailable).unwrap();

        assert_eq!(result.bid, MarketValue::Unavailable);
        assert_eq!(result.offer, MarketValue::Value(dec!(6.50)));
        assert_eq!(result.mid, MarketValue::Unavailable);
        assert_eq!(result.bid_size, MarketSize::Unavailable);
        assert_eq!(result.offer_size, MarketSize::Value(50));
    }

    #[test]
    fn leg_count_mismatch_is_an_error() {
        let quotes = [LegMarketData::unavailable()];
        let err = aggregate_structure(&put_spread(), &quotes, MarketValue::Unavailable)
            .unwrap_err();
        assert_eq!(err, AggregationError::LegCountMismatch { legs: 2, quotes: 1 });
    }

    #[test]
    fn empty_structure_is_unavailable() {
        let structure =
            OptionStructure::new("AAPL".to_string(), StructureType::Custom, vec![]);
        let result = aggregate_structure(&structure, &[], MarketValue::Unavailable).unwrap();
        assert_eq!(result, StructureMarketData::unavailable());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_leg_and_quote() -> impl Strategy<Value = (OptionLeg, LegMarketData)> {
            (
                1u32..=3,
                any::<bool>(),
                0i64..100_000,
                0i64..2_000,
                1u64..10_000,
                1u64..10_000,
            )
                .prop_map(|(ratio, long, bid_cents, spread_cents, bid_size, offer_size)| {
                    let side = if long {
                        PositionSide::Long
                    } else {
                        PositionSide::Short
                    };
                    let bid = Decimal::new(bid_cents, 2);
                    let offer = bid + Decimal::new(spread_cents, 2);
                    (
                        leg(dec!(100), side, Decimal::from(ratio)),
                        LegMarketData::two_sided(bid, offer, bid_size, offer_size),
                    )
                })
        }

        proptest! {
            #[test]
            fn bid_never_exceeds_offer(pairs in prop::collection::vec(arb_leg_and_quote(), 1..5)) {
                let (legs, quotes): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
                let structure = OptionStructure::new(
                    "TEST".to_string(),
                    StructureType::Custom,
                    legs,
                );
                let result =
                    aggregate_structure(&structure, &quotes, MarketValue::Unavailable).unwrap();
                if let (Some(bid), Some(offer)) = (result.bid.value(), result.offer.value()) {
                    prop_assert!(bid <= offer);
                }
            }

            #[test]
            fn dark_leg_always_propagates(
                pairs in prop::collection::vec(arb_leg_and_quote(), 1..5),
                dark_index in 0usize..5,
            ) {
                let (legs, mut quotes): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
                let dark_index = dark_index % quotes.len();
                quotes[dark_index] = LegMarketData::unavailable();
                let structure = OptionStructure::new(
                    "TEST".to_string(),
                    StructureType::Custom,
                    legs,
                );
                let result =
                    aggregate_structure(&structure, &quotes, MarketValue::Unavailable).unwrap();
                prop_assert_eq!(result.bid, MarketValue::Unavailable);
                prop_assert_eq!(result.offer, MarketValue::Unavailable);
                prop_assert_eq!(result.mid, MarketValue::Unavailable);
            }
        }
    }
}
