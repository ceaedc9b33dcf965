//! Blotter Order Record DTO
//!
//! The flat record the order blotter persists: display fields are
//! pre-formatted strings ("--" when unavailable), and the structured
//! recall fields carry enough to rebuild an equivalent `ParsedOrder`
//! without re-parsing the original text.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::services::PricedStructure;
use crate::domain::structure::{
    OptionLeg, OptionRight, OptionStructure, ParsedOrder, PositionSide, QuoteSide, StructureType,
};

use super::structure_table::{StructureRow, build_structure_table};

/// One leg in recall form: signed ratio, no display baggage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLeg {
    /// Expiration date.
    pub expiry: NaiveDate,
    /// Strike price.
    pub strike: Decimal,
    /// Call or put.
    pub right: OptionRight,
    /// Signed ratio (+ long / - short).
    pub ratio: Decimal,
}

/// A blotter row: priced display fields plus recall data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Unique record id.
    pub id: String,
    /// Wall-clock add time ("HH:MM").
    pub added_time: String,
    /// Underlying ticker.
    pub underlying: String,
    /// Display label: structure name plus per-leg detail.
    pub structure: String,
    /// Structure bid size or "--".
    pub bid_size: String,
    /// Structure bid or "--".
    pub bid: String,
    /// Structure mid or "--".
    pub mid: String,
    /// Structure offer or "--".
    pub offer: String,
    /// Structure offer size or "--".
    pub offer_size: String,
    /// Contract multiplier.
    pub multiplier: u32,
    /// Recall: structure type.
    pub structure_type: StructureType,
    /// Recall: legs with signed ratios.
    pub legs: Vec<RecordLeg>,
    /// Recall: stock reference.
    pub stock_ref: Option<Decimal>,
    /// Recall: signed broker delta.
    pub delta: Option<Decimal>,
    /// Recall: broker price.
    pub broker_price: Option<Decimal>,
    /// Recall: broker quote side.
    pub quote_side: Option<QuoteSide>,
    /// Recall: order quantity.
    pub quantity: u32,
}

impl OrderRecord {
    /// Build a record from a priced order.
    ///
    /// `added_at` is caller-supplied wall-clock time so records stay
    /// deterministic under test.
    #[must_use]
    pub fn from_priced(order: &ParsedOrder, priced: &PricedStructure, added_at: NaiveTime) -> Self {
        let s = &order.structure;
        let aggregate_row = aggregate_row(order, priced);
        Self {
            id: Uuid::new_v4().to_string(),
            added_time: added_at.format("%H:%M").to_string(),
            underlying: s.underlying.clone(),
            structure: format!("{} {}", s.structure_type, s.detail()),
            bid_size: aggregate_row.bid_size,
            bid: aggregate_row.bid,
            mid: aggregate_row.mid,
            offer: aggregate_row.offer,
            offer_size: aggregate_row.offer_size,
            multiplier: priced.multiplier,
            structure_type: s.structure_type,
            legs: s
                .legs
                .iter()
                .map(|leg| RecordLeg {
                    expiry: leg.expiry(),
                    strike: leg.strike(),
                    right: leg.right(),
                    ratio: leg.signed_ratio(),
                })
                .collect(),
            stock_ref: s.stock_ref,
            delta: s.delta,
            broker_price: s.broker_price,
            quote_side: s.quote_side,
            quantity: s.quantity,
        }
    }

    /// Reconstruct an equivalent order from the recall fields.
    #[must_use]
    pub fn to_parsed_order(&self) -> ParsedOrder {
        let legs = self
            .legs
            .iter()
            .enumerate()
            .map(|(i, leg)| {
                let side = if leg.ratio.is_sign_negative() {
                    PositionSide::Short
                } else {
                    PositionSide::Long
                };
                OptionLeg::new(
                    format!("Leg {}", i + 1),
                    leg.expiry,
                    leg.strike,
                    leg.right,
                    side,
                    leg.ratio.abs(),
                )
            })
            .collect();

        let mut structure =
            OptionStructure::new(self.underlying.clone(), self.structure_type, legs);
        structure.stock_ref = self.stock_ref;
        structure.delta = self.delta;
        structure.quantity = self.quantity;
        structure.quote_side = self.quote_side;
        structure.broker_price = self.broker_price;
        structure.multiplier = self.multiplier;
        ParsedOrder::new(structure, String::new())
    }
}

fn aggregate_row(order: &ParsedOrder, priced: &PricedStructure) -> StructureRow {
    build_structure_table(order, priced)
        .pop()
        .unwrap_or_else(|| unreachable!("table always carries the aggregate row"))
}
