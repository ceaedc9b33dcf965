//! Expiry Resolution
//!
//! Expiries arrive as a month name with an optional 2-digit year ("Jun26",
//! "Apr"). A bare month resolves to its nearest upcoming occurrence
//! relative to the parse date. The listed expiry day approximates the
//! standard monthly expiration as the 16th (inside the 3rd-Friday window).

use chrono::{Datelike, NaiveDate};

use super::errors::ParseError;

/// Day-of-month standing in for the standard 3rd-Friday expiration.
pub const EXPIRY_DAY: u32 = 16;

/// Month number for a 3-letter abbreviation, case-insensitive.
#[must_use]
pub fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Resolve a month + optional 2-digit year to an expiry date.
///
/// With a year, the date is fixed and must not precede `today`. Without
/// one, the month's next occurrence on or after `today` is used.
pub fn resolve_expiry(
    month: u32,
    year2: Option<u32>,
    today: NaiveDate,
) -> Result<NaiveDate, ParseError> {
    let expiry = match year2 {
        Some(yy) => {
            let year = 2000 + i32::try_from(yy).unwrap_or(0);
            let expiry = expiry_date(year, month)?;
            if expiry < today {
                return Err(ParseError::ExpiredExpiry { expiry });
            }
            expiry
        }
        None => {
            let this_year = expiry_date(today.year(), month)?;
            if this_year >= today {
                this_year
            } else {
                expiry_date(today.year() + 1, month)?
            }
        }
    };
    Ok(expiry)
}

fn expiry_date(year: i32, month: u32) -> Result<NaiveDate, ParseError> {
    NaiveDate::from_ymd_opt(year, month, EXPIRY_DAY).ok_or(ParseError::MissingExpiry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    #[test]
    fn month_names() {
        assert_eq!(month_number("Jun"), Some(6));
        assert_eq!(month_number("DEC"), Some(12));
        assert_eq!(month_number("xyz"), None);
    }

    #[test]
    fn explicit_year() {
        let expiry = resolve_expiry(6, Some(26), today()).unwrap();
        assert_eq!(expiry, NaiveDate::from_ymd_opt(2026, 6, 16).unwrap());
    }

    #[test]
    fn explicit_year_in_past_rejected() {
        let err = resolve_expiry(6, Some(24), today()).unwrap_err();
        assert!(matches!(err, ParseError::ExpiredExpiry { .. }));
    }

    #[test]
    fn bare_month_rolls_forward() {
        // Today is Nov 2025: Feb means Feb 2026, Dec means Dec 2025.
        assert_eq!(
            resolve_expiry(2, None, today()).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 16).unwrap()
        );
        assert_eq!(
            resolve_expiry(12, None, today()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 16).unwrap()
        );
    }

    #[test]
    fn bare_month_same_month_uses_expiry_day() {
        // On Nov 3 the Nov expiry (16th) is still upcoming.
        assert_eq!(
            resolve_expiry(11, None, today()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 16).unwrap()
        );
        // On Nov 20 it has passed; roll to next year.
        let late = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();
        assert_eq!(
            resolve_expiry(11, None, late).unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 16).unwrap()
        );
    }
}
