//! `dd/mm/yyyy` date handling shared by the slip calculators and requests.

use crate::error::{PayrollError, Result};
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a `dd/mm/yyyy` date, returning `None` for blank or malformed text.
///
/// Calculators use this so bad dates degrade to zero-valued results instead of
/// failing the whole slip. Surrounding whitespace counts as malformed.
pub fn parse_lenient(text: &str) -> Option<NaiveDate> {
    if text.is_empty() || text.trim() != text {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// Parses a `dd/mm/yyyy` date supplied at the boundary, where a malformed
/// value is rejected.
pub fn parse_strict(field: &str, text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|e| {
        PayrollError::ValidationError(format!(
            "{field}: '{text}' no es una fecha dd/mm/aaaa válida ({e})"
        ))
    })
}

pub fn format(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Serde adapter writing a `NaiveDate` as `dd/mm/yyyy`.
pub mod dmy {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(text.trim(), super::DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
