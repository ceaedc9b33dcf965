//! Black-Scholes Engine
//!
//! European option valuation with continuous compounding and a flat
//! dividend yield. Conventions: theta per calendar day, vega per vol
//! point (1%), rho per rate point (1%).
//!
//! At expiry (T = 0) the value degenerates to intrinsic, delta to 0/±1 by
//! moneyness, and the remaining Greeks to zero; T <= 0 never reaches the
//! closed form, so there is no division by zero to guard downstream.

use std::f64::consts::{PI, SQRT_2};

use crate::domain::pricing::errors::PricingInputError;
use crate::domain::structure::OptionRight;

/// Days per year used for theta scaling.
const DAYS_PER_YEAR: f64 = 365.0;

/// Theoretical value and Greeks for a single option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionValue {
    /// Theoretical price per unit.
    pub price: f64,
    /// dV/dS.
    pub delta: f64,
    /// d²V/dS².
    pub gamma: f64,
    /// Time decay per calendar day.
    pub theta: f64,
    /// dV per 1% vol move.
    pub vega: f64,
    /// dV per 1% rate move.
    pub rho: f64,
}

/// Standard normal CDF via the error function.
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / SQRT_2))
}

/// Standard normal PDF.
#[must_use]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

fn validate(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    div_yield: f64,
    sigma: f64,
) -> Result<(), PricingInputError> {
    for (field, value) in [
        ("spot", spot),
        ("strike", strike),
        ("time", time),
        ("rate", rate),
        ("dividend yield", div_yield),
        ("sigma", sigma),
    ] {
        if !value.is_finite() {
            return Err(PricingInputError::NonFinite { field, value });
        }
    }
    if spot <= 0.0 {
        return Err(PricingInputError::NonPositiveSpot(spot));
    }
    if strike <= 0.0 {
        return Err(PricingInputError::NonPositiveStrike(strike));
    }
    if time < 0.0 {
        return Err(PricingInputError::NegativeTimeToExpiry(time));
    }
    if sigma <= 0.0 {
        return Err(PricingInputError::NonPositiveVolatility(sigma));
    }
    Ok(())
}

/// Theoretical price only.
pub fn price(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    div_yield: f64,
    sigma: f64,
    right: OptionRight,
) -> Result<f64, PricingInputError> {
    value(spot, strike, time, rate, div_yield, sigma, right).map(|v| v.price)
}

/// Theoretical price and the five Greeks.
pub fn value(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    div_yield: f64,
    sigma: f64,
    right: OptionRight,
) -> Result<OptionValue, PricingInputError> {
    validate(spot, strike, time, rate, div_yield, sigma)?;

    if time == 0.0 {
        return Ok(expired_value(spot, strike, right));
    }

    let sqrt_t = time.sqrt();
    let d1 = ((spot / strike).ln() + (rate - div_yield + 0.5 * sigma * sigma) * time)
        / (sigma * sqrt_t);
    let d2 = d1 - sigma * sqrt_t;
    let disc_r = (-rate * time).exp();
    let disc_q = (-div_yield * time).exp();
    let pdf_d1 = norm_pdf(d1);

    let price = match right {
        OptionRight::Call => spot * disc_q * norm_cdf(d1) - strike * disc_r * norm_cdf(d2),
        OptionRight::Put => strike * disc_r * norm_cdf(-d2) - spot * disc_q * norm_cdf(-d1),
    };

    let delta = match right {
        OptionRight::Call => disc_q * norm_cdf(d1),
        OptionRight::Put => disc_q * (norm_cdf(d1) - 1.0),
    };

    let gamma = disc_q * pdf_d1 / (spot * sigma * sqrt_t);
    let vega = spot * disc_q * pdf_d1 * sqrt_t / 100.0;

    let decay = -spot * disc_q * pdf_d1 * sigma / (2.0 * sqrt_t);
    let theta = match right {
        OptionRight::Call => {
            decay - rate * strike * disc_r * norm_cdf(d2)
                + div_yield * spot * disc_q * norm_cdf(d1)
        }
        OptionRight::Put => {
            decay + rate * strike * disc_r * norm_cdf(-d2)
                - div_yield * spot * disc_q * norm_cdf(-d1)
        }
    } / DAYS_PER_YEAR;

    let rho = match right {
        OptionRight::Call => strike * time * disc_r * norm_cdf(d2) / 100.0,
        OptionRight::Put => -strike * time * disc_r * norm_cdf(-d2) / 100.0,
    };

    Ok(OptionValue {
        price,
        delta,
        gamma,
        theta,
        vega,
        rho,
    })
}

/// Limiting values at expiry: intrinsic price, step-function delta.
fn expired_value(spot: f64, strike: f64, right: OptionRight) -> OptionValue {
    let delta = match right {
        OptionRight::Call => {
            if spot > strike {
                1.0
            } else {
                0.0
            }
        }
        OptionRight::Put => {
            if spot < strike {
                -1.0
            } else {
                0.0
            }
        }
    };
    OptionValue {
        price: right.intrinsic(spot, strike),
        delta,
        gamma: 0.0,
        theta: 0.0,
        vega: 0.0,
        rho: 0.0,
    }
}
