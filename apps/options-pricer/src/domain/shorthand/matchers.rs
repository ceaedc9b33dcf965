//! Matcher Passes
//!
//! One function per token shape. Each pass scans the unconsumed tokens in
//! order, interprets the first (or every) match, and consumes what it
//! used. The pass order in `parser.rs` is the tie-break policy: a bare
//! number that reaches the strike pass is a strike, because quantity,
//! delta, and price shapes all require their suffix or keyword and run
//! first.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::errors::ParseError;
use super::expiry::{month_number, resolve_expiry};
use super::tokens::TokenList;
use crate::domain::structure::{OptionRight, OverModifier, QuoteSide, StructureType};

static STOCK_REF_ATTACHED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:vs\.?|tt|t)(\d+(?:\.\d+)?)$").unwrap_or_else(|e| unreachable!("{e}"))
});
static STOCK_REF_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:vs\.?|tt|t)$").unwrap_or_else(|e| unreachable!("{e}")));
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?$").unwrap_or_else(|e| unreachable!("{e}")));
static BID_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)b$").unwrap_or_else(|e| unreachable!("{e}"))
});
static OFFER_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)o$").unwrap_or_else(|e| unreachable!("{e}"))
});
static AT_ATTACHED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@(\d+(?:\.\d+)?)$").unwrap_or_else(|e| unreachable!("{e}"))
});
static DELTA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)d([pc])?$").unwrap_or_else(|e| unreachable!("{e}"))
});
static QUANTITY_X: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)x$").unwrap_or_else(|e| unreachable!("{e}")));
static QUANTITY_K: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)k$").unwrap_or_else(|e| unreachable!("{e}"))
});
static RATIO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)x(\d+(?:\.\d+)?)(?:x(\d+(?:\.\d+)?))?$")
        .unwrap_or_else(|e| unreachable!("{e}"))
});
static MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)(\d{2})?$")
        .unwrap_or_else(|e| unreachable!("{e}"))
});
static STRIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)([pc])?$").unwrap_or_else(|e| unreachable!("{e}"))
});
static TICKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{1,6}$").unwrap_or_else(|e| unreachable!("{e}")));

/// Words never taken as a ticker.
const TICKER_STOPWORDS: &[&str] = &["on", "a", "the", "at", "and", "over", "live"];

fn parse_decimal(token: &str) -> Result<Decimal, ParseError> {
    Decimal::from_str(token).map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
    })
}

fn snapshot(tokens: &TokenList) -> Vec<(usize, String)> {
    tokens
        .remaining()
        .into_iter()
        .map(|(i, t)| (i, t.to_string()))
        .collect()
}

/// Stock reference ("tied-to" price): `vs250.32`, `vs 262.54`, `vs. 250`,
/// `tt69.86`, `tt 171.10`, `t 250`.
pub(super) fn extract_stock_ref(tokens: &mut TokenList) -> Result<Option<Decimal>, ParseError> {
    for (i, token) in snapshot(tokens) {
        if let Some(caps) = STOCK_REF_ATTACHED.captures(&token) {
            let value = parse_decimal(&caps[1])?;
            tokens.consume(i);
            return Ok(Some(value));
        }
        if STOCK_REF_LABEL.is_match(&token)
            && let Some(next) = tokens.get_unconsumed(i + 1)
            && NUMBER.is_match(next)
        {
            let value = parse_decimal(next)?;
            tokens.consume(i);
            tokens.consume(i + 1);
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// The `live` keyword: quoted live, no stock tie.
pub(super) fn extract_live(tokens: &mut TokenList) -> bool {
    for (i, token) in snapshot(tokens) {
        if token.eq_ignore_ascii_case("live") {
            tokens.consume(i);
            return true;
        }
    }
    false
}

/// A price with its quote side, plus the size of a "500 @ 2.55" phrasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PriceToken {
    pub price: Decimal,
    pub side: QuoteSide,
    pub at_quantity: Option<u32>,
}

/// Broker price and side: `3.50 bid`, `2.4b`, `5.00 offer`, `7o`,
/// `@ 1.60`, `at 50.00`, `500 @ 2.55`.
pub(super) fn extract_price_and_side(
    tokens: &mut TokenList,
) -> Result<Option<PriceToken>, ParseError> {
    for (i, token) in snapshot(tokens) {
        if let Some(caps) = BID_SUFFIX.captures(&token) {
            let price = parse_decimal(&caps[1])?;
            tokens.consume(i);
            return Ok(Some(PriceToken {
                price,
                side: QuoteSide::Bid,
                at_quantity: None,
            }));
        }
        if let Some(caps) = OFFER_SUFFIX.captures(&token) {
            let price = parse_decimal(&caps[1])?;
            tokens.consume(i);
            return Ok(Some(PriceToken {
                price,
                side: QuoteSide::Offer,
                at_quantity: None,
            }));
        }
        if NUMBER.is_match(&token)
            && let Some(next) = tokens.get_unconsumed(i + 1)
        {
            if next.eq_ignore_ascii_case("bid") {
                let price = parse_decimal(&token)?;
                tokens.consume(i);
                tokens.consume(i + 1);
                return Ok(Some(PriceToken {
                    price,
                    side: QuoteSide::Bid,
                    at_quantity: None,
                }));
            }
            if next.eq_ignore_ascii_case("offer") || next.eq_ignore_ascii_case("offered") {
                let price = parse_decimal(&token)?;
                tokens.consume(i);
                tokens.consume(i + 1);
                return Ok(Some(PriceToken {
                    price,
                    side: QuoteSide::Offer,
                    at_quantity: None,
                }));
            }
        }
        let at_price = if token == "@" || token.eq_ignore_ascii_case("at") {
            match tokens.get_unconsumed(i + 1) {
                Some(next) if NUMBER.is_match(next) => {
                    let price = parse_decimal(next)?;
                    tokens.consume(i);
                    tokens.consume(i + 1);
                    Some(price)
                }
                _ => None,
            }
        } else if let Some(caps) = AT_ATTACHED.captures(&token) {
            let price = parse_decimal(&caps[1])?;
            tokens.consume(i);
            Some(price)
        } else {
            None
        };

        if let Some(price) = at_price {
            // "500 @ 2.55": the number before the @ is the quoted size.
            let at_quantity = i
                .checked_sub(1)
                .and_then(|prev| tokens.get_unconsumed(prev).map(|t| (prev, t.to_string())))
                .filter(|(_, t)| NUMBER.is_match(t))
                .and_then(|(prev, t)| {
                    t.parse::<u32>().ok().map(|q| {
                        tokens.consume(prev);
                        q
                    })
                });
            return Ok(Some(PriceToken {
                price,
                side: QuoteSide::Offer,
                at_quantity,
            }));
        }
    }
    Ok(None)
}

/// A broker delta magnitude plus an explicit direction when spelled
/// (`30dp` / `20dc`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct DeltaToken {
    pub magnitude: Decimal,
    pub direction: Option<OptionRight>,
}

/// Delta: `30d`, `3dp`, `20dc`, `on a 11d`.
pub(super) fn extract_delta(tokens: &mut TokenList) -> Result<Option<DeltaToken>, ParseError> {
    for (i, token) in snapshot(tokens) {
        let Some(caps) = DELTA.captures(&token) else {
            continue;
        };
        let magnitude = parse_decimal(&caps[1])?;
        let direction = caps.get(2).and_then(|m| match m.as_str() {
            "p" | "P" => Some(OptionRight::Put),
            "c" | "C" => Some(OptionRight::Call),
            _ => None,
        });
        tokens.consume(i);
        // Swallow the "on a" lead-in of "on a 11d".
        if let Some(prev) = i.checked_sub(1)
            && tokens.get_unconsumed(prev).is_some_and(|t| t.eq_ignore_ascii_case("a"))
        {
            tokens.consume(prev);
            if let Some(prev2) = prev.checked_sub(1)
                && tokens
                    .get_unconsumed(prev2)
                    .is_some_and(|t| t.eq_ignore_ascii_case("on"))
            {
                tokens.consume(prev2);
            }
        }
        return Ok(Some(DeltaToken {
            magnitude,
            direction,
        }));
    }
    Ok(None)
}

/// Order quantity: `500x`, `1058x`, `1k` (thousands).
pub(super) fn extract_quantity(tokens: &mut TokenList) -> Result<Option<u32>, ParseError> {
    for (i, token) in snapshot(tokens) {
        if let Some(caps) = QUANTITY_X.captures(&token) {
            let quantity = caps[1].parse::<u32>().map_err(|_| ParseError::InvalidNumber {
                token: token.clone(),
            })?;
            tokens.consume(i);
            return Ok(Some(quantity));
        }
        if let Some(caps) = QUANTITY_K.captures(&token) {
            let thousands = parse_decimal(&caps[1])?;
            let quantity = (thousands * Decimal::ONE_THOUSAND).to_u32().ok_or_else(|| {
                ParseError::InvalidNumber {
                    token: token.clone(),
                }
            })?;
            tokens.consume(i);
            return Ok(Some(quantity));
        }
    }
    Ok(None)
}

/// Leg ratio: `1x2`, `1X3`, `1x2x1`, `1x1.5x1`.
pub(super) fn extract_ratio(tokens: &mut TokenList) -> Result<Option<Vec<Decimal>>, ParseError> {
    for (i, token) in snapshot(tokens) {
        let Some(caps) = RATIO.captures(&token) else {
            continue;
        };
        let mut parts = vec![parse_decimal(&caps[1])?, parse_decimal(&caps[2])?];
        if let Some(third) = caps.get(3) {
            parts.push(parse_decimal(third.as_str())?);
        }
        tokens.consume(i);
        return Ok(Some(parts));
    }
    Ok(None)
}

/// Directional modifier: `putover`, `put over`, `callover`, `call over`,
/// `1X over`.
pub(super) fn extract_modifier(tokens: &mut TokenList) -> Option<OverModifier> {
    for (i, token) in snapshot(tokens) {
        let lower = token.to_ascii_lowercase();
        match lower.as_str() {
            "putover" => {
                tokens.consume(i);
                return Some(OverModifier::PutOver);
            }
            "callover" => {
                tokens.consume(i);
                return Some(OverModifier::CallOver);
            }
            _ => {}
        }
        let next_is_over = tokens
            .get_unconsumed(i + 1)
            .is_some_and(|t| t.eq_ignore_ascii_case("over"));
        if !next_is_over {
            continue;
        }
        let modifier = match lower.as_str() {
            "put" => Some(OverModifier::PutOver),
            "call" => Some(OverModifier::CallOver),
            _ if QUANTITY_X.is_match(&lower) => Some(OverModifier::OneLotOver),
            _ => None,
        };
        if let Some(modifier) = modifier {
            tokens.consume(i);
            tokens.consume(i + 1);
            return Some(modifier);
        }
    }
    None
}

/// Structure tag: the recognized alias set, phrases first so "put spread
/// collar" never half-matches as "put spread".
pub(super) fn extract_structure_tag(tokens: &mut TokenList) -> Option<StructureType> {
    let lowered: Vec<(usize, String)> = snapshot(tokens)
        .into_iter()
        .map(|(i, t)| (i, t.to_ascii_lowercase()))
        .collect();
    let adjacent = |a: usize, b: usize| b == a + 1;

    // Three-word phrases.
    for window in lowered.windows(3) {
        let [(i, first), (j, second), (k, third)] = window else {
            continue;
        };
        if !adjacent(*i, *j)
            || !adjacent(*j, *k)
            || second.as_str() != "spread"
            || third.as_str() != "collar"
        {
            continue;
        }
        let tag = match first.as_str() {
            "put" => Some(StructureType::PutSpreadCollar),
            "call" => Some(StructureType::CallSpreadCollar),
            _ => None,
        };
        if let Some(tag) = tag {
            tokens.consume(*i);
            tokens.consume(*j);
            tokens.consume(*k);
            return Some(tag);
        }
    }

    // Two-word phrases.
    for window in lowered.windows(2) {
        let [(i, first), (j, second)] = window else {
            continue;
        };
        if !adjacent(*i, *j) {
            continue;
        }
        let tag = match (first.as_str(), second.as_str()) {
            ("put", "spread") => Some(StructureType::PutSpread),
            ("call", "spread") => Some(StructureType::CallSpread),
            ("risk", "reversal") => Some(StructureType::RiskReversal),
            ("put", "fly") => Some(StructureType::PutFly),
            ("call", "fly") => Some(StructureType::CallFly),
            ("iron", "butterfly" | "fly") => Some(StructureType::IronButterfly),
            ("iron", "condor") => Some(StructureType::IronCondor),
            ("put", "condor") => Some(StructureType::PutCondor),
            ("call", "condor") => Some(StructureType::CallCondor),
            ("put", "stupid") => Some(StructureType::PutStupid),
            ("call", "stupid") => Some(StructureType::CallStupid),
            _ => None,
        };
        if let Some(tag) = tag {
            tokens.consume(*i);
            tokens.consume(*j);
            return Some(tag);
        }
    }

    // Single-token aliases.
    for (i, token) in lowered {
        let tag = match token.as_str() {
            "ps" => Some(StructureType::PutSpread),
            "cs" => Some(StructureType::CallSpread),
            "rr" | "risky" => Some(StructureType::RiskReversal),
            "straddle" => Some(StructureType::Straddle),
            "strangle" => Some(StructureType::Strangle),
            "fly" | "butterfly" => Some(StructureType::Butterfly),
            "pf" => Some(StructureType::PutFly),
            "cf" => Some(StructureType::CallFly),
            "if" | "ibf" => Some(StructureType::IronButterfly),
            "ic" => Some(StructureType::IronCondor),
            "pc" => Some(StructureType::PutCondor),
            "cc" => Some(StructureType::CallCondor),
            "collar" => Some(StructureType::Collar),
            "csc" => Some(StructureType::CallSpreadCollar),
            "psc" => Some(StructureType::PutSpreadCollar),
            _ => None,
        };
        if let Some(tag) = tag {
            tokens.consume(i);
            return Some(tag);
        }
    }
    None
}

/// Bare type word fixing the default right: `call`, `calls`, `put`, `puts`.
pub(super) fn extract_type_word(tokens: &mut TokenList) -> Option<OptionRight> {
    for (i, token) in snapshot(tokens) {
        let right = match token.to_ascii_lowercase().as_str() {
            "call" | "calls" => Some(OptionRight::Call),
            "put" | "puts" => Some(OptionRight::Put),
            _ => None,
        };
        if let Some(right) = right {
            tokens.consume(i);
            return Some(right);
        }
    }
    None
}

/// Every expiry token in encounter order: `Jun26`, `Apr`, `jan27`.
pub(super) fn extract_expiries(
    tokens: &mut TokenList,
    today: NaiveDate,
) -> Result<Vec<NaiveDate>, ParseError> {
    let mut expiries = Vec::new();
    for (i, token) in snapshot(tokens) {
        let Some(caps) = MONTH.captures(&token) else {
            continue;
        };
        let Some(month) = month_number(&caps[1]) else {
            continue;
        };
        let year2 = caps
            .get(2)
            .map(|m| {
                m.as_str()
                    .parse::<u32>()
                    .map_err(|_| ParseError::InvalidNumber {
                        token: token.clone(),
                    })
            })
            .transpose()?;
        expiries.push(resolve_expiry(month, year2, today)?);
        tokens.consume(i);
    }
    Ok(expiries)
}

/// One listed strike with its optional explicit right ("240", "45P").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct StrikeSlot {
    pub strike: Decimal,
    pub right: Option<OptionRight>,
}

/// Every strike in encounter order. Slash groups ("240/220",
/// "3900/3950/4100/4150") fix both count and order; bare surviving
/// numbers are strikes by the tie-break policy.
pub(super) fn extract_strikes(tokens: &mut TokenList) -> Result<Vec<StrikeSlot>, ParseError> {
    let mut slots = Vec::new();
    for (i, token) in snapshot(tokens) {
        if token.contains('/') {
            let mut group = Vec::new();
            for part in token.split('/') {
                let caps = STRIKE.captures(part).ok_or_else(|| ParseError::InvalidStrike {
                    token: part.to_string(),
                })?;
                group.push(strike_slot(&caps)?);
            }
            tokens.consume(i);
            slots.extend(group);
            continue;
        }
        if let Some(caps) = STRIKE.captures(&token) {
            slots.push(strike_slot(&caps)?);
            tokens.consume(i);
        }
    }
    Ok(slots)
}

fn strike_slot(caps: &regex::Captures<'_>) -> Result<StrikeSlot, ParseError> {
    let strike = parse_decimal(&caps[1])?;
    let right = caps
        .get(2)
        .and_then(|m| m.as_str().chars().next())
        .and_then(OptionRight::from_code);
    Ok(StrikeSlot { strike, right })
}

/// The underlying ticker: first surviving bare alphabetic token.
pub(super) fn extract_ticker(tokens: &mut TokenList, text: &str) -> Result<String, ParseError> {
    for (i, token) in snapshot(tokens) {
        if TICKER.is_match(&token)
            && !TICKER_STOPWORDS.contains(&token.to_ascii_lowercase().as_str())
        {
            tokens.consume(i);
            return Ok(token.to_ascii_uppercase());
        }
    }
    Err(ParseError::MissingTicker {
        text: text.to_string(),
    })
}
