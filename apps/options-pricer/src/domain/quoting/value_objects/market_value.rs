//! Market Value Sentinel Types
//!
//! Every numeric field flowing out of market data is either a value or an
//! explicit "unavailable" marker. A missing quote is never represented as
//! zero: display code renders `Unavailable` as the literal "--" and the
//! aggregator propagates it instead of blending partial data.

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Sentinel text for an unavailable field.
pub const UNAVAILABLE: &str = "--";

/// A price-typed market field: a decimal value or explicitly unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketValue {
    /// A quoted value.
    Value(Decimal),
    /// No usable quote.
    #[default]
    Unavailable,
}

impl MarketValue {
    /// The inner value, if available.
    #[must_use]
    pub const fn value(&self) -> Option<Decimal> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Unavailable => None,
        }
    }

    /// Whether a value is present.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Apply `f` to the value, keeping `Unavailable` as-is.
    #[must_use]
    pub fn map(self, f: impl FnOnce(Decimal) -> Decimal) -> Self {
        match self {
            Self::Value(v) => Self::Value(f(v)),
            Self::Unavailable => Self::Unavailable,
        }
    }

    /// Combine two fields; unavailable on either side wins.
    #[must_use]
    pub fn zip_with(self, other: Self, f: impl FnOnce(Decimal, Decimal) -> Decimal) -> Self {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => Self::Value(f(a, b)),
            _ => Self::Unavailable,
        }
    }
}

impl From<Option<Decimal>> for MarketValue {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(Self::Unavailable, Self::Value)
    }
}

impl From<Decimal> for MarketValue {
    fn from(value: Decimal) -> Self {
        Self::Value(value)
    }
}

impl fmt::Display for MarketValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Unavailable => write!(f, "{UNAVAILABLE}"),
        }
    }
}

impl Serialize for MarketValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MarketValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        if text == UNAVAILABLE {
            return Ok(Self::Unavailable);
        }
        Decimal::from_str(&text)
            .map(Self::Value)
            .map_err(|e| D::Error::custom(format!("invalid market value '{text}': {e}")))
    }
}

/// A size-typed market field: a contract count or explicitly unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketSize {
    /// Available size in contracts.
    Value(u64),
    /// No usable size.
    #[default]
    Unavailable,
}

impl MarketSize {
    /// The inner size, if available.
    #[must_use]
    pub const fn value(&self) -> Option<u64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Unavailable => None,
        }
    }

    /// Whether a size is present.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl From<Option<u64>> for MarketSize {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Self::Unavailable, Self::Value)
    }
}

impl From<u64> for MarketSize {
    fn from(value: u64) -> Self {
        Self::Value(value)
    }
}

impl fmt::Display for MarketSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Unavailable => write!(f, "{UNAVAILABLE}"),
        }
    }
}

impl Serialize for MarketSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MarketSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        if text == UNAVAILABLE {
            return Ok(Self::Unavailable);
        }
        text.parse::<u64>()
            .map(Self::Value)
            .map_err(|e| D::Error::custom(format!("invalid market size '{text}': {e}")))
    }
}
