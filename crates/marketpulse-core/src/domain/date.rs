use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, Duration};

use crate::ValidationError;

const ISO_DATE: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Calendar date of a daily bar, ISO-8601 text form.
///
/// Chart adapters require a flat, sortable scalar for the time axis; this
/// newtype is that scalar everywhere downstream of normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDate(Date);

impl TradingDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        // Upstream indexes sometimes carry a time-of-day suffix; the date
        // part is authoritative for daily bars.
        let date_part = trimmed
            .split_once(['T', ' '])
            .map_or(trimmed, |(date, _)| date);

        Date::parse(date_part, ISO_DATE)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub fn from_date(value: Date) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> Date {
        self.0
    }

    /// Shift backwards by whole calendar days (warm-up window math).
    pub fn checked_sub_days(self, days: u16) -> Result<Self, ValidationError> {
        self.0
            .checked_sub(Duration::days(i64::from(days)))
            .map(Self)
            .ok_or_else(|| ValidationError::DateOutOfRange {
                value: self.format_iso8601(),
            })
    }

    pub fn format_iso8601(self) -> String {
        self.0
            .format(ISO_DATE)
            .expect("TradingDate must be ISO-8601 formattable")
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso8601())
    }
}

impl Serialize for TradingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso8601())
    }
}

impl<'de> Deserialize<'de> for TradingDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
