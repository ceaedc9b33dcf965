//! Parsed Order Value Object

use serde::{Deserialize, Serialize};

use super::{OptionStructure, QuoteSide, StructureType};
use crate::domain::structure::templates::leg_templates;

/// The parser's output: a fully-resolved structure plus the raw source
/// text for traceability.
///
/// Created once per parse call and immutable afterwards; the pricing path
/// consumes it and nothing persists it beyond the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOrder {
    /// The resolved structure with broker context.
    pub structure: OptionStructure,
    /// The raw shorthand text this order was parsed from.
    pub raw_text: String,
}

impl ParsedOrder {
    /// Create a parsed order.
    #[must_use]
    pub const fn new(structure: OptionStructure, raw_text: String) -> Self {
        Self {
            structure,
            raw_text,
        }
    }

    /// Re-serialize into canonical shorthand.
    ///
    /// Parsing the result yields an equivalent structure (same legs, stock
    /// reference, delta, quantity, price, and side). The canonical form
    /// spells the delta direction (`dp`/`dc`) explicitly so the sign
    /// survives structures with no implied delta side.
    #[must_use]
    pub fn to_shorthand(&self) -> String {
        let s = &self.structure;
        let mut out: Vec<String> = vec![s.underlying.clone()];

        // Strike slots in listing order: legs collapsed by (strike, expiry).
        let mut slots: Vec<(rust_decimal::Decimal, chrono::NaiveDate)> = Vec::new();
        for leg in &s.legs {
            if !slots.contains(&(leg.strike(), leg.expiry())) {
                slots.push((leg.strike(), leg.expiry()));
            }
        }

        if slots.is_empty() {
            return out.join(" ");
        }

        let single_expiry = slots.iter().all(|(_, e)| *e == slots[0].1);
        let explicit_rights = matches!(
            s.structure_type,
            StructureType::Call | StructureType::Put | StructureType::Custom
        );
        let strike_token = |strike: rust_decimal::Decimal, slot: usize| {
            if explicit_rights {
                // Right of the first leg at this slot.
                let right = s
                    .legs
                    .iter()
                    .find(|l| (l.strike(), l.expiry()) == slots[slot])
                    .map_or('C', |l| l.right().code());
                format!("{}{right}", strike.normalize())
            } else {
                strike.normalize().to_string()
            }
        };

        if single_expiry {
            out.push(slots[0].1.format("%b%y").to_string());
            let strikes: Vec<String> = slots
                .iter()
                .enumerate()
                .map(|(i, (k, _))| strike_token(*k, i))
                .collect();
            out.push(strikes.join("/"));
        } else {
            for (i, (strike, expiry)) in slots.iter().enumerate() {
                out.push(expiry.format("%b%y").to_string());
                out.push(strike_token(*strike, i));
            }
        }

        if let Some(tag) = s.structure_type.canonical_tag() {
            out.push(tag.to_string());
        }

        if let Some(template) = leg_templates(s.structure_type) {
            // Per-slot ratio magnitudes, emitted only when they differ from
            // the template defaults.
            let mut magnitudes = vec![rust_decimal::Decimal::ONE; slots.len()];
            let mut defaults = true;
            let mut flipped = true;
            for (leg, entry) in s.legs.iter().zip(template.iter()) {
                magnitudes[entry.slot] = leg.ratio();
                if leg.ratio() != rust_decimal::Decimal::from(entry.ratio.abs()) {
                    defaults = false;
                }
                if leg.signed_ratio().is_sign_positive() == (entry.ratio > 0) {
                    flipped = false;
                }
            }
            if !defaults {
                let parts: Vec<String> =
                    magnitudes.iter().map(|m| m.normalize().to_string()).collect();
                out.push(parts.join("x"));
            }
            if flipped {
                let put_long = s
                    .legs
                    .iter()
                    .any(|l| l.right() == super::OptionRight::Put && l.side().is_long());
                out.push(if put_long { "putover" } else { "callover" }.to_string());
            }
        }

        if leg_templates(s.structure_type).is_none()
            && s.legs.iter().any(|l| l.ratio() != rust_decimal::Decimal::ONE)
        {
            let parts: Vec<String> = s
                .legs
                .iter()
                .map(|l| l.ratio().normalize().to_string())
                .collect();
            out.push(parts.join("x"));
        }

        if let Some(stock_ref) = s.stock_ref {
            out.push(format!("vs{}", stock_ref.normalize()));
        }

        if let Some(delta) = s.delta {
            let suffix = if delta.is_sign_negative() { 'p' } else { 'c' };
            out.push(format!("{}d{suffix}", delta.abs().normalize()));
        }

        if s.quantity != 1 {
            out.push(format!("{}x", s.quantity));
        }

        if let Some(price) = s.broker_price {
            match s.quote_side {
                Some(QuoteSide::Offer) => out.push(format!("@ {}", price.normalize())),
                // A priced order with no side round-trips as a bid.
                _ => out.push(format!("{} bid", price.normalize())),
            }
        }

        out.join(" ")
    }
}
