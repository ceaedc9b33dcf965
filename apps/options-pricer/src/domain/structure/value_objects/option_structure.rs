//! Option Structure Value Object

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{OptionLeg, StructureType};

/// Default contract multiplier for equity options.
pub const DEFAULT_MULTIPLIER: u32 = 100;

/// Which side of the market the broker's price is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSide {
    /// Broker is bidding (willing to buy).
    Bid,
    /// Broker is offering (willing to sell).
    Offer,
}

impl fmt::Display for QuoteSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bid => write!(f, "bid"),
            Self::Offer => write!(f, "offer"),
        }
    }
}

/// A multi-leg option structure quoted as a single unit.
///
/// Carries both the legs and the broker context around them: the stock
/// reference ("tied-to") price, the quoted hedge delta, the order quantity,
/// and the broker's own price when one was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionStructure {
    /// Underlying ticker.
    pub underlying: String,
    /// Recognized shape tag, or `Custom`.
    pub structure_type: StructureType,
    /// Ordered legs. Order is display-significant only.
    pub legs: Vec<OptionLeg>,
    /// Stock reference price the package is tied to, if quoted "vs" stock.
    pub stock_ref: Option<Decimal>,
    /// Broker-quoted hedge delta in percent, signed (put-side negative).
    pub delta: Option<Decimal>,
    /// Order quantity (contracts of the smallest leg).
    pub quantity: u32,
    /// Side of the broker's quoted price.
    pub quote_side: Option<QuoteSide>,
    /// Broker's price for the whole structure.
    pub broker_price: Option<Decimal>,
    /// Contract multiplier (shares per contract).
    pub multiplier: u32,
}

impl OptionStructure {
    /// Create a structure with default quantity/multiplier and no broker
    /// context.
    #[must_use]
    pub const fn new(
        underlying: String,
        structure_type: StructureType,
        legs: Vec<OptionLeg>,
    ) -> Self {
        Self {
            underlying,
            structure_type,
            legs,
            stock_ref: None,
            delta: None,
            quantity: 1,
            quote_side: None,
            broker_price: None,
            multiplier: DEFAULT_MULTIPLIER,
        }
    }

    /// Net signed ratio across all legs.
    #[must_use]
    pub fn net_ratio(&self) -> Decimal {
        self.legs.iter().map(OptionLeg::signed_ratio).sum()
    }

    /// Hedge shares implied by the quoted delta:
    /// quantity x multiplier x delta / 100.
    #[must_use]
    pub fn hedge_shares(&self) -> Option<Decimal> {
        let delta = self.delta?;
        Some(Decimal::from(self.quantity) * Decimal::from(self.multiplier) * delta / Decimal::ONE_HUNDRED)
    }

    /// Compact per-leg description, e.g. "240P Jun26 / 220P Jun26".
    #[must_use]
    pub fn detail(&self) -> String {
        self.legs
            .iter()
            .map(|leg| {
                format!(
                    "{}{} {}",
                    leg.strike().normalize(),
                    leg.right().code(),
                    leg.expiry().format("%b%y")
                )
            })
            .collect::<Vec<_>>()
            .join(" / ")
    }
}
