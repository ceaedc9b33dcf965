//! Pricing Errors

use thiserror::Error;

/// Invalid numeric input to the pricing engine.
///
/// Rejected at the call boundary, never silently clamped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingInputError {
    /// Spot must be strictly positive.
    #[error("spot price must be positive, got {0}")]
    NonPositiveSpot(f64),

    /// Strike must be strictly positive.
    #[error("strike must be positive, got {0}")]
    NonPositiveStrike(f64),

    /// Volatility must be strictly positive.
    #[error("volatility must be positive, got {0}")]
    NonPositiveVolatility(f64),

    /// Time to expiry may be zero (expiry) but never negative.
    #[error("time to expiry must not be negative, got {0}")]
    NegativeTimeToExpiry(f64),

    /// NaN or infinity in any input.
    #[error("non-finite {field}: {value}")]
    NonFinite {
        /// Which input was non-finite.
        field: &'static str,
        /// The offending value.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            PricingInputError::NonPositiveSpot(-1.0).to_string(),
            "spot price must be positive, got -1"
        );
        assert_eq!(
            PricingInputError::NonFinite {
                field: "sigma",
                value: f64::NAN,
            }
            .to_string(),
            "non-finite sigma: NaN"
        );
    }
}
