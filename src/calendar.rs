//! Dates of the Barovian calendar: twelve months of exactly 28 days each.

use chrono::NaiveDate;
use derive_more::Display;
use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::{pair, preceded, tuple},
    IResult,
};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind, Result};

pub const DAYS_IN_MONTH: u32 = 28;
pub const MONTHS_IN_YEAR: u32 = 12;
pub const CAMPAIGN_YEAR: i32 = 735;

const DAYS_IN_YEAR: i64 = (DAYS_IN_MONTH * MONTHS_IN_YEAR) as i64;

// Ordinals are kept within whole years representable as i32.
const MIN_ORDINAL: i64 = i32::MIN as i64 * DAYS_IN_YEAR;
const MAX_ORDINAL: i64 = (i32::MAX as i64 + 1) * DAYS_IN_YEAR - 1;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    Yinvar,
    Fivral,
    Mart,
    Apryl,
    Mai,
    Eyune,
    Eyule,
    Avgust,
    Sintyavr,
    Octyavr,
    Neyavr,
    Dekavr,
}

impl Month {
    pub const ALL: [Month; MONTHS_IN_YEAR as usize] = [
        Month::Yinvar,
        Month::Fivral,
        Month::Mart,
        Month::Apryl,
        Month::Mai,
        Month::Eyune,
        Month::Eyule,
        Month::Avgust,
        Month::Sintyavr,
        Month::Octyavr,
        Month::Neyavr,
        Month::Dekavr,
    ];

    /// Zero-based position in the year, `Yinvar` being 0.
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Month> {
        Month::ALL.get(index as usize).copied()
    }

    pub fn name(self) -> String {
        self.to_string()
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Month::ALL
            .iter()
            .copied()
            .find(|month| month.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::UnknownMonth,
                    &format!("'{}' is not a Barovian month", s),
                )
            })
    }
}

/// A day of the Barovian calendar.
///
/// Stored as the number of days since 1 Yinvar of year 0. Year, month and
/// day are derived by fixed-radix division, so every month has exactly
/// `DAYS_IN_MONTH` days and ordering follows (year, month, day). The count
/// saturates at the first day of year `i32::MIN` and the last day of year
/// `i32::MAX`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct CalendarDate(i64);

impl CalendarDate {
    pub fn new(year: i32, month: Month, day: u32) -> Result<Self> {
        if !(1..=DAYS_IN_MONTH).contains(&day) {
            return Err(Error::new(
                ErrorKind::InvalidDate,
                &format!(
                    "{} has no day {} (days run from 1 to {})",
                    month, day, DAYS_IN_MONTH
                ),
            ));
        }

        Ok(CalendarDate::first_of(year, month).advance((day - 1) as i64))
    }

    pub fn from_ymd(year: i32, month_index: u32, day: u32) -> Result<Self> {
        let month = Month::from_index(month_index).ok_or_else(|| {
            Error::new(
                ErrorKind::UnknownMonth,
                &format!("month index {} is out of range", month_index),
            )
        })?;
        CalendarDate::new(year, month, day)
    }

    pub fn first_of(year: i32, month: Month) -> Self {
        CalendarDate(year as i64 * DAYS_IN_YEAR + (month.index() * DAYS_IN_MONTH) as i64)
    }

    pub fn from_ordinal(days: i64) -> Self {
        CalendarDate(days.clamp(MIN_ORDINAL, MAX_ORDINAL))
    }

    pub fn ordinal(&self) -> i64 {
        self.0
    }

    pub fn year(&self) -> i32 {
        let year = self.0.div_euclid(DAYS_IN_YEAR);
        i32::try_from(year).unwrap_or(if year < 0 { i32::MIN } else { i32::MAX })
    }

    fn day_of_year(&self) -> u32 {
        self.0.rem_euclid(DAYS_IN_YEAR) as u32
    }

    pub fn month(&self) -> Month {
        Month::ALL[(self.day_of_year() / DAYS_IN_MONTH) as usize]
    }

    pub fn month_index(&self) -> u32 {
        self.month().index()
    }

    pub fn day(&self) -> u32 {
        self.day_of_year() % DAYS_IN_MONTH + 1
    }

    /// Moves `days` days forward (or backward for negative values), rolling
    /// over month and year boundaries.
    pub fn advance(self, days: i64) -> Self {
        CalendarDate::from_ordinal(self.0.saturating_add(days))
    }

    pub fn retreat(self, days: i64) -> Self {
        self.advance(days.saturating_neg())
    }

    pub fn with_day(self, day: u32) -> Result<Self> {
        CalendarDate::new(self.year(), self.month(), day)
    }

    pub fn first_of_month(self) -> Self {
        self.advance(1 - self.day() as i64)
    }

    pub fn same_month(&self, other: &CalendarDate) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }

    /// Number of calendar days from `earlier` to `self`; negative if `self`
    /// comes first.
    pub fn days_since(&self, earlier: &CalendarDate) -> i64 {
        self.0 - earlier.0
    }

    /// All days of the month containing `self`, in order.
    pub fn days_of_month(self) -> impl Iterator<Item = CalendarDate> {
        let first = self.first_of_month();
        (0..DAYS_IN_MONTH as i64).map(move |offset| first.advance(offset))
    }

    /// Reads (year, month, day) as a proleptic Gregorian date. Always
    /// defined for day numbers up to 28 within chrono's year range.
    pub fn to_gregorian(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year(), self.month_index() + 1, self.day())
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {}", self.month(), self.day(), self.year())
    }
}

fn date_parts(input: &str) -> IResult<&str, (&str, u32, i32)> {
    all_consuming(tuple((
        take_while1(|c: char| c.is_alphabetic()),
        preceded(space1, map_res(digit1, |s: &str| s.parse::<u32>())),
        preceded(
            pair(char(','), space0),
            map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
                s.parse::<i32>()
            }),
        ),
    )))(input)
}

impl FromStr for CalendarDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, (month, day, year)) = date_parts(s.trim()).map_err(|e| {
            Error::from(e).with_msg(&format!(
                "'{}' is not of the form '<Month> <day>, <year>'",
                s
            ))
        })?;

        CalendarDate::new(year, month.parse()?, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn date(month: Month, day: u32) -> CalendarDate {
        CalendarDate::new(CAMPAIGN_YEAR, month, day).unwrap()
    }

    #[test]
    fn fields_roundtrip_through_ordinal() {
        let d = date(Month::Octyavr, 27);
        assert_eq!(d.year(), 735);
        assert_eq!(d.month(), Month::Octyavr);
        assert_eq!(d.month_index(), 9);
        assert_eq!(d.day(), 27);
        assert_eq!(CalendarDate::from_ordinal(d.ordinal()), d);
    }

    #[test]
    fn advance_rolls_over_month() {
        assert_eq!(date(Month::Octyavr, 28).advance(1), date(Month::Neyavr, 1));
        assert_eq!(date(Month::Octyavr, 27).advance(5), date(Month::Neyavr, 4));
        assert_eq!(date(Month::Neyavr, 1).advance(-1), date(Month::Octyavr, 28));
    }

    #[test]
    fn advance_rolls_over_year() {
        let eve = date(Month::Dekavr, 28);
        let next = eve.advance(1);
        assert_eq!(next, CalendarDate::new(736, Month::Yinvar, 1).unwrap());
        assert_eq!(next.retreat(1), eve);
    }

    #[test]
    fn advance_zero_is_identity() {
        let d = date(Month::Mai, 13);
        assert_eq!(d.advance(0), d);
    }

    #[test]
    fn advance_is_reversible() {
        let start = date(Month::Octyavr, 27);
        for delta in [-1000, -337, -28, -1, 1, 2, 27, 28, 29, 336, 5000] {
            assert_eq!(start.advance(delta).advance(-delta), start, "delta {}", delta);
        }
    }

    #[test]
    fn multiples_of_28_keep_day_of_month() {
        let start = date(Month::Fivral, 9);
        for k in -30..=30 {
            let moved = start.advance(k * DAYS_IN_MONTH as i64);
            assert_eq!(moved.day(), 9);
        }
        assert_eq!(start.advance(28).month(), Month::Mart);
        assert_eq!(start.advance(12 * 28).year(), 736);
    }

    #[test]
    fn negative_years_divide_euclidean() {
        let d = CalendarDate::from_ordinal(-1);
        assert_eq!(d.year(), -1);
        assert_eq!(d.month(), Month::Dekavr);
        assert_eq!(d.day(), 28);
    }

    #[test]
    fn advance_saturates_at_year_range() {
        let start = date(Month::Octyavr, 27);
        let later = start.advance(DAYS_IN_YEAR * i32::MAX as i64);
        assert!(later > start);
        assert_eq!(later.year(), i32::MAX);
        assert_eq!(later.to_string().parse::<CalendarDate>().unwrap(), later);

        let last = later.advance(i64::MAX);
        assert_eq!(last, CalendarDate::new(i32::MAX, Month::Dekavr, 28).unwrap());
        assert_eq!(last.advance(4_294_967_295), last);
        assert_eq!(last.advance(-1).day(), 27);

        let first = start.advance(i64::MIN);
        assert_eq!(first, CalendarDate::new(i32::MIN, Month::Yinvar, 1).unwrap());
        assert_eq!(first.to_string(), "Yinvar 1, -2147483648");
        assert_eq!(first.to_string().parse::<CalendarDate>().unwrap(), first);
        assert!(first < start);

        assert_eq!(CalendarDate::from_ordinal(i64::MAX), last);
    }

    #[test]
    fn ordering_follows_year_month_day() {
        assert!(date(Month::Octyavr, 28) < date(Month::Neyavr, 1));
        assert!(date(Month::Dekavr, 28) < CalendarDate::new(736, Month::Yinvar, 1).unwrap());
        assert!(date(Month::Neyavr, 3) > date(Month::Neyavr, 2));
    }

    #[test]
    fn rejects_days_outside_month() {
        assert!(CalendarDate::new(735, Month::Mart, 0).is_err());
        assert!(CalendarDate::new(735, Month::Mart, 29).is_err());
        assert!(CalendarDate::from_ymd(735, 12, 1).is_err());
        assert!(date(Month::Mart, 5).with_day(31).is_err());
    }

    #[test]
    fn month_helpers() {
        let d = date(Month::Neyavr, 17);
        assert_eq!(d.first_of_month(), date(Month::Neyavr, 1));
        assert_eq!(d.days_of_month().count(), 28);
        assert_eq!(d.days_of_month().last(), Some(date(Month::Neyavr, 28)));
        assert!(d.same_month(&date(Month::Neyavr, 2)));
        assert!(!d.same_month(&date(Month::Octyavr, 17)));
        assert_eq!(d.days_since(&date(Month::Octyavr, 17)), 28);
    }

    #[test]
    fn display_and_parse() {
        let d = date(Month::Octyavr, 27);
        assert_eq!(d.to_string(), "Octyavr 27, 735");
        assert_eq!("Octyavr 27, 735".parse::<CalendarDate>().unwrap(), d);
        assert_eq!("  octyavr 27,735 ".parse::<CalendarDate>().unwrap(), d);
        assert_eq!(
            "Yinvar 1, -2".parse::<CalendarDate>().unwrap().year(),
            -2
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("Brumaire 3, 735".parse::<CalendarDate>().is_err());
        assert!("Octyavr 29, 735".parse::<CalendarDate>().is_err());
        assert!("Octyavr 27 735".parse::<CalendarDate>().is_err());
        assert!("27 Octyavr, 735".parse::<CalendarDate>().is_err());
        assert!("".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn gregorian_reading() {
        let d = date(Month::Neyavr, 1);
        assert_eq!(d.to_gregorian(), NaiveDate::from_ymd_opt(735, 11, 1));
    }

    #[test]
    fn deserializes_from_toml_string() {
        #[derive(Deserialize)]
        struct Holder {
            when: CalendarDate,
        }

        let holder: Holder = toml::from_str(r#"when = "Neyavr 14, 735""#).unwrap();
        assert_eq!(holder.when, date(Month::Neyavr, 14));
        assert!(toml::from_str::<Holder>(r#"when = "Neyavr 40, 735""#).is_err());
    }
}
