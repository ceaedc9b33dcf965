//! Structure-Type Leg Templates
//!
//! The single source of truth for each recognized shape's leg layout:
//! which strike slot each leg reads, its option right, and its signed
//! default ratio. Strike slots are positional by listing order in the
//! shorthand, never by strike magnitude. Adding a structure type means
//! adding one table entry here; parser control flow never changes.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::errors::StructureError;
use super::value_objects::{OptionLeg, OptionRight, PositionSide, StructureType};

/// One leg of a structure template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegTemplate {
    /// Index into the listed strike slots.
    pub slot: usize,
    /// Option right of this leg.
    pub right: OptionRight,
    /// Signed default ratio (+ long / - short).
    pub ratio: i8,
}

const fn t(slot: usize, right: OptionRight, ratio: i8) -> LegTemplate {
    LegTemplate { slot, right, ratio }
}

use OptionRight::{Call, Put};

const CALL: &[LegTemplate] = &[t(0, Call, 1)];
const PUT: &[LegTemplate] = &[t(0, Put, 1)];
const PUT_SPREAD: &[LegTemplate] = &[t(0, Put, 1), t(1, Put, -1)];
const CALL_SPREAD: &[LegTemplate] = &[t(0, Call, 1), t(1, Call, -1)];
const RISK_REVERSAL: &[LegTemplate] = &[t(0, Put, -1), t(1, Call, 1)];
const STRADDLE: &[LegTemplate] = &[t(0, Call, 1), t(0, Put, 1)];
const STRANGLE: &[LegTemplate] = &[t(0, Put, 1), t(1, Call, 1)];
const BUTTERFLY: &[LegTemplate] = &[t(0, Call, 1), t(1, Call, -2), t(2, Call, 1)];
const PUT_FLY: &[LegTemplate] = &[t(0, Put, 1), t(1, Put, -2), t(2, Put, 1)];
const CALL_FLY: &[LegTemplate] = &[t(0, Call, 1), t(1, Call, -2), t(2, Call, 1)];
const IRON_BUTTERFLY: &[LegTemplate] = &[
    t(0, Put, 1),
    t(1, Put, -1),
    t(1, Call, -1),
    t(2, Call, 1),
];
const IRON_CONDOR: &[LegTemplate] = &[
    t(0, Put, 1),
    t(1, Put, -1),
    t(2, Call, -1),
    t(3, Call, 1),
];
const PUT_CONDOR: &[LegTemplate] = &[
    t(0, Put, 1),
    t(1, Put, -1),
    t(2, Put, -1),
    t(3, Put, 1),
];
const CALL_CONDOR: &[LegTemplate] = &[
    t(0, Call, 1),
    t(1, Call, -1),
    t(2, Call, -1),
    t(3, Call, 1),
];
const COLLAR: &[LegTemplate] = &[t(0, Put, 1), t(1, Call, -1)];
const CALL_SPREAD_COLLAR: &[LegTemplate] = &[t(0, Put, 1), t(1, Call, -1), t(2, Call, 1)];
const PUT_SPREAD_COLLAR: &[LegTemplate] = &[t(0, Put, -1), t(1, Put, 1), t(2, Call, -1)];
const PUT_STUPID: &[LegTemplate] = &[t(0, Put, 1), t(1, Put, 1)];
const CALL_STUPID: &[LegTemplate] = &[t(0, Call, 1), t(1, Call, 1)];

/// Look up the leg template for a structure type.
///
/// Returns `None` for `Custom`, whose legs come from explicit per-strike
/// types instead of a table entry.
#[must_use]
pub const fn leg_templates(structure_type: StructureType) -> Option<&'static [LegTemplate]> {
    match structure_type {
        StructureType::Call => Some(CALL),
        StructureType::Put => Some(PUT),
        StructureType::PutSpread => Some(PUT_SPREAD),
        StructureType::CallSpread => Some(CALL_SPREAD),
        StructureType::RiskReversal => Some(RISK_REVERSAL),
        StructureType::Straddle => Some(STRADDLE),
        StructureType::Strangle => Some(STRANGLE),
        StructureType::Butterfly => Some(BUTTERFLY),
        StructureType::PutFly => Some(PUT_FLY),
        StructureType::CallFly => Some(CALL_FLY),
        StructureType::IronButterfly => Some(IRON_BUTTERFLY),
        StructureType::IronCondor => Some(IRON_CONDOR),
        StructureType::PutCondor => Some(PUT_CONDOR),
        StructureType::CallCondor => Some(CALL_CONDOR),
        StructureType::Collar => Some(COLLAR),
        StructureType::CallSpreadCollar => Some(CALL_SPREAD_COLLAR),
        StructureType::PutSpreadCollar => Some(PUT_SPREAD_COLLAR),
        StructureType::PutStupid => Some(PUT_STUPID),
        StructureType::CallStupid => Some(CALL_STUPID),
        StructureType::Custom => None,
    }
}

/// Directional modifier resolving long/short ambiguity in near-1:1
/// combinations ("putover", "callover", "1x over").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverModifier {
    /// The put leg carries the premium (is bought).
    PutOver,
    /// The call leg carries the premium (is bought).
    CallOver,
    /// The 1-lot leg of an unequal-ratio structure is bought.
    OneLotOver,
}

impl OverModifier {
    /// Shorthand spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PutOver => "putover",
            Self::CallOver => "callover",
            Self::OneLotOver => "1x over",
        }
    }
}

/// Build the canonical ordered leg list for a tagged structure.
///
/// Strikes are slot-ordered as listed in the shorthand. Expiries are
/// assigned to slots positionally; a single expiry covers every slot
/// (calendar phrasings list one expiry per slot). `ratios` overrides the
/// per-slot magnitudes; signs always come from the template, modulo a
/// whole-structure flip from `modifier`.
pub fn resolve_legs(
    structure_type: StructureType,
    strikes: &[Decimal],
    expiries: &[NaiveDate],
    ratios: Option<&[Decimal]>,
    modifier: Option<OverModifier>,
) -> Result<Vec<OptionLeg>, StructureError> {
    let Some(template) = leg_templates(structure_type) else {
        return Err(StructureError::InvalidLeg {
            message: "custom structures have no leg template".to_string(),
        });
    };

    let expected = structure_type.strike_slot_count();
    if strikes.len() != expected {
        return Err(StructureError::StrikeCountMismatch {
            structure_type,
            expected,
            found: strikes.len(),
        });
    }
    if expiries.is_empty() {
        return Err(StructureError::MissingExpiry { structure_type });
    }

    if let Some(r) = ratios {
        let ratio_text = || {
            r.iter()
                .map(|m| m.normalize().to_string())
                .collect::<Vec<_>>()
                .join("x")
        };
        if r.len() != expected {
            return Err(StructureError::RatioMismatch {
                structure_type,
                ratio: ratio_text(),
                expected,
            });
        }
        // 3-part ratios only describe fly-shaped bodies.
        let fly_shaped = matches!(
            structure_type,
            StructureType::Butterfly
                | StructureType::PutFly
                | StructureType::CallFly
                | StructureType::IronButterfly
        );
        if r.len() == 3 && !fly_shaped {
            return Err(StructureError::RatioMismatch {
                structure_type,
                ratio: ratio_text(),
                expected,
            });
        }
        if r.iter().any(|m| *m <= Decimal::ZERO) {
            return Err(StructureError::InvalidLeg {
                message: format!("ratio {} has a non-positive part", ratio_text()),
            });
        }
    }

    let mut legs = Vec::with_capacity(template.len());
    for (i, entry) in template.iter().enumerate() {
        let strike = strikes[entry.slot];
        if strike <= Decimal::ZERO {
            return Err(StructureError::InvalidLeg {
                message: format!("strike {strike} must be positive"),
            });
        }
        let expiry = expiries[entry.slot.min(expiries.len() - 1)];
        let magnitude =
            ratios.map_or_else(|| Decimal::from(entry.ratio.abs()), |r| r[entry.slot]);
        let side = if entry.ratio > 0 {
            PositionSide::Long
        } else {
            PositionSide::Short
        };
        legs.push(OptionLeg::new(
            format!("Leg {}", i + 1),
            expiry,
            strike,
            entry.right,
            side,
            magnitude,
        ));
    }

    if let Some(modifier) = apply_modifier(structure_type, &mut legs, modifier)? {
        tracing::debug!(?modifier, "flipped structure legs for over-modifier");
    }

    Ok(legs)
}

/// Apply a directional modifier, flipping every leg when the named leg is
/// not already the bought one. Returns the modifier when a flip happened.
fn apply_modifier(
    structure_type: StructureType,
    legs: &mut [OptionLeg],
    modifier: Option<OverModifier>,
) -> Result<Option<OverModifier>, StructureError> {
    let Some(modifier) = modifier else {
        return Ok(None);
    };

    let signed_sum = |right: OptionRight| -> Decimal {
        legs.iter()
            .filter(|l| l.right() == right)
            .map(OptionLeg::signed_ratio)
            .sum()
    };
    let has = |right: OptionRight| legs.iter().any(|l| l.right() == right);

    let flip = match modifier {
        OverModifier::PutOver => {
            if !has(Put) {
                return Err(StructureError::ModifierConflict {
                    structure_type,
                    modifier: modifier.as_str().to_string(),
                });
            }
            // Only meaningful when there is a call side to flip against.
            has(Call) && signed_sum(Put) <= Decimal::ZERO
        }
        OverModifier::CallOver => {
            if !has(Call) {
                return Err(StructureError::ModifierConflict {
                    structure_type,
                    modifier: modifier.as_str().to_string(),
                });
            }
            has(Put) && signed_sum(Call) <= Decimal::ZERO
        }
        OverModifier::OneLotOver => legs
            .iter()
            .min_by_key(|l| l.ratio())
            .is_some_and(|l| l.side().is_short()),
    };

    if flip {
        for leg in legs.iter_mut() {
            *leg = leg.flipped();
        }
        return Ok(Some(modifier));
    }
    Ok(None)
}
