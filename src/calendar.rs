use crate::error::{CalendarError, CalendarResult};
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Days between a Monday and the Sunday closing its week.
pub const WEEK_SPAN_DAYS: u64 = 6;

pub fn first_of_month(year: i32, month: u32) -> CalendarResult<NaiveDate> {
    gregorian_date(year, month, 1)
}

pub fn gregorian_date(year: i32, month: u32, day: u32) -> CalendarResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(CalendarError::InvalidGregorianDate { year, month, day })
}

/// Last calendar day of a month
pub fn last_day_of_month(year: i32, month: u32) -> CalendarResult<NaiveDate> {
    let first = first_of_month(year, month)?;
    let next = first
        .checked_add_months(chrono::Months::new(1))
        .ok_or(CalendarError::InvalidGregorianDate { year, month, day: 1 })?;
    next.pred_opt()
        .ok_or(CalendarError::InvalidGregorianDate { year, month, day: 1 })
}

/// Find the nth occurrence of a weekday in a month, scanning from day 1.
pub fn nth_weekday_of_month(
    year: i32,
    month: u32,
    weekday: Weekday,
    n: u32,
) -> CalendarResult<NaiveDate> {
    let mut date = first_of_month(year, month)?;
    let mut count = 0;

    while date.month() == month {
        if date.weekday() == weekday {
            count += 1;
            if count == n {
                return Ok(date);
            }
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    Err(CalendarError::RuleUnsatisfiable {
        year,
        month,
        occurrence: n,
        unit: weekday.to_string(),
    })
}

/// Monday opening the ISO week that contains `date`
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

pub fn sunday_of_week(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).last_day()
}

/// Week number `week_index` of a month: the first Monday on or after the 1st,
/// advanced by whole weeks. Always Monday-anchored.
pub fn nth_week_of_month(
    year: i32,
    month: u32,
    week_index: u32,
) -> CalendarResult<(NaiveDate, NaiveDate)> {
    let unsatisfiable = || CalendarError::RuleUnsatisfiable {
        year,
        month,
        occurrence: week_index,
        unit: "week".to_string(),
    };
    if week_index == 0 {
        return Err(unsatisfiable());
    }

    let first_monday = nth_weekday_of_month(year, month, Weekday::Mon, 1)?;
    let monday = first_monday
        .checked_add_days(Days::new(7 * u64::from(week_index - 1)))
        .filter(|d| d.month() == month && d.year() == year)
        .ok_or_else(unsatisfiable)?;
    let sunday = monday
        .checked_add_days(Days::new(WEEK_SPAN_DAYS))
        .ok_or_else(unsatisfiable)?;
    Ok((monday, sunday))
}

/// The Monday-start week containing the last day of the month.
pub fn last_week_of_month(year: i32, month: u32) -> CalendarResult<(NaiveDate, NaiveDate)> {
    let last = last_day_of_month(year, month)?;
    Ok((monday_of_week(last), sunday_of_week(last)))
}

/// Shift a date by a signed number of days.
pub fn offset_days(date: NaiveDate, days: i64) -> CalendarResult<NaiveDate> {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or(CalendarError::InvalidGregorianDate {
        year: date.year(),
        month: date.month(),
        day: date.day(),
    })
}
