//! Shorthand Parser
//!
//! Orchestrates the matcher passes over the token list. The pass order
//! IS the tie-break policy for ambiguous tokens:
//!
//! 1. stock reference, 2. `live`, 3. price + side, 4. delta,
//! 5. ratio, 6. over-modifier, 7. quantity, 8. structure tag,
//! 9. type words, 10. expiries, 11. strikes, 12. ticker.
//!
//! Quantity (`500x`), delta (`30d`), and price (`6 bid`) all require a
//! suffix or keyword, so a bare number that survives to pass 11 is always
//! a strike — strike wins over quantity, and quantity over delta, exactly
//! because the suffixed shapes are consumed before bare numbers are ever
//! considered.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use super::errors::ParseError;
use super::matchers::{self, DeltaToken, StrikeSlot};
use super::tokens::TokenList;
use crate::domain::structure::{
    OptionLeg, OptionRight, OptionStructure, OverModifier, ParsedOrder, PositionSide,
    StructureError, StructureType, resolve_legs,
};

/// Parse broker shorthand using today's date for bare-month expiries.
pub fn parse_order(text: &str) -> Result<ParsedOrder, ParseError> {
    parse_order_at(text, Utc::now().date_naive())
}

/// Parse broker shorthand against an explicit parse date.
///
/// Returns a fully-resolved [`ParsedOrder`] or a [`ParseError`] naming
/// what could not be interpreted. Nothing is partially applied.
pub fn parse_order_at(text: &str, today: NaiveDate) -> Result<ParsedOrder, ParseError> {
    let trimmed = text.trim();
    let mut tokens = TokenList::new(trimmed);
    if tokens.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let stock_ref = matchers::extract_stock_ref(&mut tokens)?;
    let live = matchers::extract_live(&mut tokens);
    if live && stock_ref.is_some() {
        return Err(ParseError::LiveWithStockRef);
    }

    let price = matchers::extract_price_and_side(&mut tokens)?;
    let delta = matchers::extract_delta(&mut tokens)?;
    let ratio = matchers::extract_ratio(&mut tokens)?;
    let modifier = matchers::extract_modifier(&mut tokens);
    let quantity = matchers::extract_quantity(&mut tokens)?;
    let tag = matchers::extract_structure_tag(&mut tokens);
    let type_word = matchers::extract_type_word(&mut tokens);
    let expiries = matchers::extract_expiries(&mut tokens, today)?;
    let strikes = matchers::extract_strikes(&mut tokens)?;
    let underlying = matchers::extract_ticker(&mut tokens, trimmed)?;

    let leftovers = tokens.leftovers();
    if !leftovers.is_empty() {
        tracing::debug!(?leftovers, "ignoring uninterpreted tokens");
    }

    if strikes.is_empty() {
        return Err(ParseError::MissingStrikes);
    }
    if expiries.is_empty() {
        return Err(ParseError::MissingExpiry);
    }

    let (structure_type, legs) = build_legs(
        tag,
        &strikes,
        &expiries,
        ratio.as_deref(),
        modifier,
        type_word,
    )?;

    let mut structure = OptionStructure::new(underlying, structure_type, legs);
    // "live" means no stock tie: reference and delta stay unset.
    if !live {
        structure.stock_ref = stock_ref;
        structure.delta = delta.map(|d| signed_delta(&d, structure_type, modifier));
    }
    structure.quantity = quantity
        .or(price.as_ref().and_then(|p| p.at_quantity))
        .unwrap_or(1);
    if let Some(price) = price {
        structure.broker_price = Some(price.price);
        structure.quote_side = Some(price.side);
    }

    tracing::debug!(
        underlying = %structure.underlying,
        structure_type = %structure.structure_type,
        legs = structure.legs.len(),
        "parsed shorthand order"
    );
    Ok(ParsedOrder::new(structure, trimmed.to_string()))
}

/// Resolve the structure type and build its legs.
///
/// A recognized tag goes through the template table. Untagged input falls
/// back to a single call/put for one strike or a custom structure with
/// explicit per-leg types for two; anything wider without a tag is
/// ambiguous.
fn build_legs(
    tag: Option<StructureType>,
    strikes: &[StrikeSlot],
    expiries: &[NaiveDate],
    ratios: Option<&[Decimal]>,
    modifier: Option<OverModifier>,
    type_word: Option<OptionRight>,
) -> Result<(StructureType, Vec<OptionLeg>), ParseError> {
    let strike_values: Vec<Decimal> = strikes.iter().map(|s| s.strike).collect();

    if let Some(tag) = tag {
        let legs = resolve_legs(tag, &strike_values, expiries, ratios, modifier)?;
        return Ok((tag, legs));
    }

    match strikes.len() {
        1 => {
            let right = strikes[0]
                .right
                .or(type_word)
                .ok_or(ParseError::UnknownOptionRight)?;
            let structure_type = match right {
                OptionRight::Call => StructureType::Call,
                OptionRight::Put => StructureType::Put,
            };
            let legs = resolve_legs(structure_type, &strike_values, expiries, ratios, modifier)?;
            Ok((structure_type, legs))
        }
        2 => {
            if let Some(modifier) = modifier {
                return Err(StructureError::ModifierConflict {
                    structure_type: StructureType::Custom,
                    modifier: modifier.as_str().to_string(),
                }
                .into());
            }
            if let Some(r) = ratios
                && r.len() != strikes.len()
            {
                return Err(StructureError::RatioMismatch {
                    structure_type: StructureType::Custom,
                    ratio: r
                        .iter()
                        .map(|m| m.normalize().to_string())
                        .collect::<Vec<_>>()
                        .join("x"),
                    expected: strikes.len(),
                }
                .into());
            }
            let mut legs = Vec::with_capacity(strikes.len());
            for (i, slot) in strikes.iter().enumerate() {
                let right = slot
                    .right
                    .or(type_word)
                    .ok_or(ParseError::UnknownOptionRight)?;
                let magnitude = ratios.map_or(Decimal::ONE, |r| r[i]);
                legs.push(OptionLeg::new(
                    format!("Leg {}", i + 1),
                    expiries[i.min(expiries.len() - 1)],
                    slot.strike,
                    right,
                    PositionSide::Long,
                    magnitude,
                ));
            }
            Ok((StructureType::Custom, legs))
        }
        n => Err(ParseError::AmbiguousStructure { strikes: n }),
    }
}

/// Sign the broker delta: an explicit `dp`/`dc` wins, then a put/call
/// over-modifier, then the structure's own delta side.
fn signed_delta(
    delta: &DeltaToken,
    structure_type: StructureType,
    modifier: Option<OverModifier>,
) -> Decimal {
    let negative = match delta.direction {
        Some(OptionRight::Put) => true,
        Some(OptionRight::Call) => false,
        None => match modifier {
            Some(OverModifier::PutOver) => true,
            Some(OverModifier::CallOver) => false,
            _ => structure_type.is_put_delta(),
        },
    };
    if negative {
        -delta.magnitude
    } else {
        delta.magnitude
    }
}
