use std::{fmt, str::FromStr};
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date};

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The calendar day a trip took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TripDate(Date);

impl TripDate {
    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn into_date(self) -> Date {
        self.0
    }
}

impl From<Date> for TripDate {
    fn from(from: Date) -> Self {
        Self(from)
    }
}

#[derive(Debug, Error)]
#[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
pub struct TripDateParseError(String);

impl FromStr for TripDate {
    type Err = TripDateParseError;

    /// Accepts `YYYY-MM-DD` optionally followed by a time part,
    /// e.g. `2024-03-05T10:22:00.000Z`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let day = match s.char_indices().nth(10) {
            Some((idx, 'T' | ' ')) => &s[..idx],
            _ => s,
        };
        Date::parse(day, DATE_FORMAT)
            .map(Self)
            .map_err(|_| TripDateParseError(s.to_string()))
    }
}

impl fmt::Display for TripDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let formatted = self.0.format(DATE_FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parse_plain_date() {
        let d: TripDate = "2024-03-05".parse().unwrap();
        assert_eq!(date!(2024 - 03 - 05), d.into_date());
        assert_eq!("2024-03-05", d.to_string());
    }

    #[test]
    fn parse_date_with_time_part() {
        let d: TripDate = "2024-03-05T10:22:00.000Z".parse().unwrap();
        assert_eq!(date!(2024 - 03 - 05), d.into_date());
        let d: TripDate = "2024-03-05 10:22:00".parse().unwrap();
        assert_eq!(date!(2024 - 03 - 05), d.into_date());
    }

    #[test]
    fn reject_invalid_dates() {
        assert!("Date".parse::<TripDate>().is_err());
        assert!("".parse::<TripDate>().is_err());
        assert!("2024-13-01".parse::<TripDate>().is_err());
        assert!("05/03/2024".parse::<TripDate>().is_err());
    }

    #[test]
    fn order_by_day() {
        let a: TripDate = "2023-12-31".parse().unwrap();
        let b: TripDate = "2024-01-01".parse().unwrap();
        assert!(a < b);
    }
}
