//! Structure Table DTO
//!
//! The ordered leg rows plus one pinned aggregate row the dashboard
//! renders. All numeric fields are pre-formatted strings; anything
//! unavailable is the literal "--", never "0.00" or null.

use serde::{Deserialize, Serialize};

use crate::application::services::PricedStructure;
use crate::domain::quoting::value_objects::{MarketSize, MarketValue};
use crate::domain::structure::ParsedOrder;

/// Row label of the pinned aggregate row.
pub const STRUCTURE_ROW_LABEL: &str = "Structure";

/// One display row: a leg, or the pinned structure aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureRow {
    /// Leg label ("Leg 1", ...) or "Structure".
    pub leg: String,
    /// Expiry ("Jun26"), empty on the aggregate row.
    pub expiry: String,
    /// Strike, empty on the aggregate row.
    pub strike: String,
    /// "C" or "P", empty on the aggregate row.
    #[serde(rename = "type")]
    pub option_type: String,
    /// Signed ratio, empty on the aggregate row.
    pub ratio: String,
    /// Bid size or "--".
    pub bid_size: String,
    /// Bid or "--".
    pub bid: String,
    /// Mid or "--".
    pub mid: String,
    /// Offer or "--".
    pub offer: String,
    /// Offer size or "--".
    pub offer_size: String,
}

fn fmt_price(value: MarketValue) -> String {
    value
        .value()
        .map_or_else(|| MarketValue::Unavailable.to_string(), |d| format!("{d:.2}"))
}

fn fmt_size(value: MarketSize) -> String {
    value.to_string()
}

/// Build the leg rows plus the pinned aggregate row for a priced order.
///
/// A one-sided leg shows its good side as the mid; the aggregate row
/// reflects exactly what the aggregator produced, unavailable sides
/// included.
#[must_use]
pub fn build_structure_table(order: &ParsedOrder, priced: &PricedStructure) -> Vec<StructureRow> {
    let mut rows = Vec::with_capacity(order.structure.legs.len() + 1);

    for (leg, quote) in order.structure.legs.iter().zip(&priced.leg_quotes) {
        rows.push(StructureRow {
            leg: leg.label().to_string(),
            expiry: leg.expiry().format("%b%y").to_string(),
            strike: leg.strike().normalize().to_string(),
            option_type: leg.right().code().to_string(),
            ratio: leg.signed_ratio().normalize().to_string(),
            bid_size: fmt_size(quote.bid_size),
            bid: fmt_price(quote.bid),
            mid: fmt_price(quote.display_mid()),
            offer: fmt_price(quote.offer),
            offer_size: fmt_size(quote.offer_size),
        });
    }

    let aggregate = &priced.structure;
    rows.push(StructureRow {
        leg: STRUCTURE_ROW_LABEL.to_string(),
        expiry: String::new(),
        strike: String::new(),
        option_type: String::new(),
        ratio: String::new(),
        bid_size: fmt_size(aggregate.bid_size),
        bid: fmt_price(aggregate.bid),
        mid: fmt_price(aggregate.mid),
        offer: fmt_price(aggregate.offer),
        offer_size: fmt_size(aggregate.offer_size),
    });

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quoting::{LegMarketData, StructureMarketData};
    use crate::domain::shorthand::parse_order_at;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn order() -> ParsedOrder {
        parse_order_at(
            "AAPL Jun26 240/220 PS 1X2 500x",
            NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
        )
        .unwrap()
    }

    fn priced(leg_quotes: Vec<LegMarketData>, structure: StructureMarketData) -> PricedStructure {
        PricedStructure {
            spot: MarketValue::Value(dec!(250)),
            multiplier: 100,
            leg_quotes,
            structure,
        }
    }

    #[test]
    fn leg_rows_and_pinned_aggregate() {
        let priced = priced(
            vec![
                LegMarketData::two_sided(dec!(10.00), dec!(10.50), 300, 400),
                LegMarketData::two_sided(dec!(4.00), dec!(4.40), 500, 200),
            ],
            StructureMarketData {
                bid: MarketValue::Value(dec!(1.20)),
                offer: MarketValue::Value(dec!(2.50)),
                mid: MarketValue::Value(dec!(1.85)),
                bid_size: MarketSize::Value(125),
                offer_size: MarketSize::Value(250),
            },
        );
        let rows = build_structure_table(&order(), &priced);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].leg, "Leg 1");
        assert_eq!(rows[0].expiry, "Jun26");
        assert_eq!(rows[0].strike, "240");
        assert_eq!(rows[0].option_type, "P");
        assert_eq!(rows[0].ratio, "1");
        assert_eq!(rows[0].mid, "10.25");
        assert_eq!(rows[1].ratio, "-2");
        assert_eq!(rows[2].leg, "Structure");
        assert_eq!(rows[2].bid, "1.20");
        assert_eq!(rows[2].offer, "2.50");
        assert_eq!(rows[2].strike, "");
    }

    #[test]
    fn unavailable_renders_dashes_not_zero() {
        let priced = priced(
            vec![
                LegMarketData::two_sided(dec!(10.00), dec!(10.50), 300, 400),
                LegMarketData::unavailable(),
            ],
            StructureMarketData::unavailable(),
        );
        let rows = build_structure_table(&order(), &priced);

        assert_eq!(rows[1].bid, "--");
        assert_eq!(rows[1].mid, "--");
        assert_eq!(rows[1].bid_size, "--");
        assert_eq!(rows[2].bid, "--");
        assert_eq!(rows[2].offer, "--");
        assert!(!rows.iter().any(|r| r.bid == "0.00"));
    }

    #[test]
    fn one_sided_leg_mid_falls_back() {
        let one_sided = LegMarketData {
            bid: MarketValue::Value(dec!(10.00)),
            offer: MarketValue::Unavailable,
            bid_size: MarketSize::Value(300),
            offer_size: MarketSize::Unavailable,
        };
        let priced = priced(
            vec![one_sided, LegMarketData::two_sided(dec!(4.00), dec!(4.40), 1, 1)],
            StructureMarketData::unavailable(),
        );
        let rows = build_structure_table(&order(), &priced);

        assert_eq!(rows[0].bid, "10.00");
        assert_eq!(rows[0].mid, "10.00");
        assert_eq!(rows[0].offer, "--");
    }

    #[test]
    fn serde_uses_type_key() {
        let priced = priced(
            vec![
                LegMarketData::two_sided(dec!(1), dec!(2), 1, 1),
                LegMarketData::two_sided(dec!(1), dec!(2), 1, 1),
            ],
            StructureMarketData::unavailable(),
        );
        let rows = build_structure_table(&order(), &priced);
        let json = serde_json::to_string(&rows[0]).unwrap();
        assert!(json.contains("\"type\":\"P\""));
        assert!(json.contains("\"bid_size\":"));
    }
}
