use jiff::civil::{Date, date};

use crate::error::{Error, Result};

/// Currency codes the rate service is known to support, sorted.
pub const KNOWN_CURRENCIES: [&str; 6] = ["EUR", "MDL", "RON", "RUB", "UAH", "USD"];

/// Inclusive range of dates the rate service has data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub min: Date,
    pub max: Date,
}

impl DateWindow {
    pub const DEFAULT: DateWindow = DateWindow {
        min: date(2025, 1, 1),
        max: date(2025, 9, 15),
    };

    pub fn contains(&self, d: Date) -> bool {
        self.min <= d && d <= self.max
    }

    /// Parse `text` as `YYYY-MM-DD` and check it falls inside this window.
    ///
    /// Returns the canonical ISO form of the date.
    pub fn validate(&self, text: &str) -> Result<String> {
        const BAD_FORMAT: Error = Error::InvalidFormat("The date must be in the format YYYY-MM-DD.");
        if !has_date_shape(text) {
            return Err(BAD_FORMAT);
        }
        let d = Date::strptime("%Y-%m-%d", text).map_err(|_| BAD_FORMAT)?;
        if !self.contains(d) {
            return Err(Error::OutOfRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(d.to_string())
    }
}

/// Four digits, then one or two for month and day, separated by `-`. No signs or padding.
fn has_date_shape(text: &str) -> bool {
    let mut parts = text.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    year.len() == 4
        && (1..=2).contains(&month.len())
        && (1..=2).contains(&day.len())
        && [year, month, day]
            .iter()
            .all(|part| part.bytes().all(|b| b.is_ascii_digit()))
}

/// Check that `code` is a 3-letter code from [`KNOWN_CURRENCIES`], in any case.
///
/// Returns the code in upper case.
pub fn validate_currency(code: &str) -> Result<String> {
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(Error::InvalidFormat(
            "The currency code must consist of 3 letters (e.g. USD)",
        ));
    }

    let code = code.to_ascii_uppercase();
    if !KNOWN_CURRENCIES.contains(&code.as_str()) {
        return Err(Error::UnknownCurrency {
            code,
            supported: KNOWN_CURRENCIES.join(", "),
        });
    }
    Ok(code)
}

/// Validate `text` against [`DateWindow::DEFAULT`].
pub fn validate_date(text: &str) -> Result<String> {
    DateWindow::DEFAULT.validate(text)
}
