//! Declarative date rules.
//!
//! A rule only describes how to derive dates; it carries no name or category.
//! Gregorian-anchored rules resolve to a single inclusive span per year, the
//! lunar rule is resolved by the evaluator because it needs the candidate
//! Hijri-year search.

use crate::calendar::{
    gregorian_date, last_week_of_month, monday_of_week, nth_week_of_month, nth_weekday_of_month,
    offset_days,
};
use crate::error::CalendarResult;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HolidayRule {
    /// Fixed month/day; the event ends `span_days` after it starts.
    FixedGregorian { month: u32, day: u32, span_days: i64 },
    /// A Hijri month/day, preceded by `eve_days` eve days and lasting
    /// `span_days` after the first holiday day.
    LunarAnchored {
        hijri_month: u32,
        hijri_day: u32,
        eve_days: i64,
        span_days: i64,
    },
    /// The nth `weekday` of `month`, shifted by `offset_days`.
    NthWeekdayOfMonth {
        month: u32,
        weekday: Weekday,
        occurrence: u32,
        #[serde(default)]
        offset_days: i64,
        span_days: i64,
    },
    /// Week number `week` of the month, counted from its first Monday.
    NthWeekOfMonth { month: u32, week: u32, span_days: i64 },
    /// The Monday-start week containing a fixed date.
    WeekContaining { month: u32, day: u32, span_days: i64 },
    /// The Monday-start week containing the last day of the month.
    LastWeekOfMonth { month: u32, span_days: i64 },
    /// `length_days` consecutive days starting at a fixed date.
    FixedRange { month: u32, day: u32, length_days: i64 },
}

impl HolidayRule {
    pub fn is_lunar(&self) -> bool {
        matches!(self, HolidayRule::LunarAnchored { .. })
    }

    /// Resolve a Gregorian-anchored rule against `year`. Returns `Ok(None)`
    /// for lunar rules.
    pub fn gregorian_span(&self, year: i32) -> CalendarResult<Option<(NaiveDate, NaiveDate)>> {
        let span = match *self {
            HolidayRule::LunarAnchored { .. } => return Ok(None),
            HolidayRule::FixedGregorian { month, day, span_days } => {
                let start = gregorian_date(year, month, day)?;
                (start, offset_days(start, span_days)?)
            }
            HolidayRule::NthWeekdayOfMonth {
                month,
                weekday,
                occurrence,
                offset_days: shift,
                span_days,
            } => {
                let found = nth_weekday_of_month(year, month, weekday, occurrence)?;
                let start = offset_days(found, shift)?;
                (start, offset_days(start, span_days)?)
            }
            HolidayRule::NthWeekOfMonth { month, week, span_days } => {
                let (monday, _) = nth_week_of_month(year, month, week)?;
                (monday, offset_days(monday, span_days)?)
            }
            HolidayRule::WeekContaining { month, day, span_days } => {
                let monday = monday_of_week(gregorian_date(year, month, day)?);
                (monday, offset_days(monday, span_days)?)
            }
            HolidayRule::LastWeekOfMonth { month, span_days } => {
                let (monday, _) = last_week_of_month(year, month)?;
                (monday, offset_days(monday, span_days)?)
            }
            HolidayRule::FixedRange { month, day, length_days } => {
                let start = gregorian_date(year, month, day)?;
                (start, offset_days(start, length_days - 1)?)
            }
        };
        Ok(Some(span))
    }

    /// Whether the rule yields a Monday-start week span.
    pub fn is_week_anchored(&self) -> bool {
        matches!(
            self,
            HolidayRule::NthWeekOfMonth { .. }
                | HolidayRule::WeekContaining { .. }
                | HolidayRule::LastWeekOfMonth { .. }
        )
    }
}
