//! Arithmetic (tabular) Hijri calendar.
//!
//! Conversions go through ICU's `IslamicCivil` calendar (civil epoch, 30-year
//! leap cycle). No observational correction is applied, so results can differ
//! by a day from announced religious dates.

use crate::error::{CalendarError, CalendarResult};
use chrono::{Datelike, NaiveDate};
use icu_calendar::islamic::IslamicCivil;
use icu_calendar::{Date, Iso};
use std::fmt;

/// Gregorian month/day used to pick the Hijri year "belonging" to a Gregorian year.
pub const ANCHOR_MONTH: u32 = 6;
pub const ANCHOR_DAY: u32 = 15;

pub const SHAWWAL: u32 = 10;
pub const DHU_AL_HIJJAH: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HijriDate {
    year: i32,
    month: u32,
    day: u32,
}

impl HijriDate {
    /// Build a validated Hijri date. Fails with `InvalidHijriDate` when the
    /// month is outside 1..=12 or the day does not exist in that month.
    pub fn new(year: i32, month: u32, day: u32) -> CalendarResult<Self> {
        let civil = civil_date(year, month, day)?;
        if day > u32::from(civil.days_in_month()) {
            return Err(CalendarError::InvalidHijriDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn from_gregorian(date: NaiveDate) -> CalendarResult<Self> {
        let civil = iso_date(date)?.to_calendar(IslamicCivil::new());
        Ok(Self {
            year: civil.year().number,
            month: civil.month().ordinal,
            day: civil.day_of_month().0,
        })
    }

    pub fn to_gregorian(&self) -> CalendarResult<NaiveDate> {
        let iso = civil_date(self.year, self.month, self.day)?.to_iso();
        let (year, month, day) = (
            iso.year().number,
            iso.month().ordinal,
            iso.day_of_month().0,
        );
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(CalendarError::OutOfRange { year, month, day })
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02} AH", self.year, self.month, self.day)
    }
}

/// Leap years carry a 30th day in Dhu al-Hijjah; 11 of every 30 years.
pub fn is_leap_year(year: i32) -> bool {
    year_length(year) == 355
}

/// Number of days in a Hijri month, or 0 for a month outside 1..=12.
pub fn month_length(year: i32, month: u32) -> u32 {
    civil_date(year, month, 1)
        .map(|d| u32::from(d.days_in_month()))
        .unwrap_or(0)
}

pub fn year_length(year: i32) -> u32 {
    civil_date(year, 1, 1)
        .map(|d| u32::from(d.days_in_year()))
        .unwrap_or(0)
}

/// Hijri year containing the given Gregorian date.
pub fn hijri_year_of(date: NaiveDate) -> CalendarResult<i32> {
    Ok(HijriDate::from_gregorian(date)?.year)
}

/// Hijri year used as the centre of the candidate search for a Gregorian year.
pub fn anchor_hijri_year(gregorian_year: i32) -> CalendarResult<i32> {
    let anchor = NaiveDate::from_ymd_opt(gregorian_year, ANCHOR_MONTH, ANCHOR_DAY).ok_or(
        CalendarError::InvalidGregorianDate {
            year: gregorian_year,
            month: ANCHOR_MONTH,
            day: ANCHOR_DAY,
        },
    )?;
    hijri_year_of(anchor)
}

pub fn hijri_to_gregorian(year: i32, month: u32, day: u32) -> CalendarResult<NaiveDate> {
    HijriDate::new(year, month, day)?.to_gregorian()
}

fn civil_date(year: i32, month: u32, day: u32) -> CalendarResult<Date<IslamicCivil>> {
    let invalid = CalendarError::InvalidHijriDate { year, month, day };
    if !(1..=12).contains(&month) || day == 0 {
        return Err(invalid);
    }
    let (Ok(m), Ok(d)) = (u8::try_from(month), u8::try_from(day)) else {
        return Err(invalid);
    };
    Date::try_new_islamic_civil_date_with_calendar(year, m, d, IslamicCivil::new())
        .map_err(|_| invalid)
}

fn iso_date(date: NaiveDate) -> CalendarResult<Date<Iso>> {
    // chrono months and days always fit in u8.
    Date::try_new_iso_date(date.year(), date.month() as u8, date.day() as u8).map_err(|_| {
        CalendarError::OutOfRange {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    })
}
