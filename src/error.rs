//! Error types for calendar arithmetic and rule evaluation.

/// Error type for all fallible calendar computations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A Hijri month/day combination outside the bounds of the lunar calendar.
    #[error("invalid hijri date {year}-{month:02}-{day:02}")]
    InvalidHijriDate {
        /// Hijri year.
        year: i32,
        /// Hijri month (1-12).
        month: u32,
        /// Hijri day.
        day: u32,
    },

    /// A Gregorian month/day combination that does not exist in the given year.
    #[error("invalid gregorian date {year}-{month:02}-{day:02}")]
    InvalidGregorianDate {
        /// Gregorian year.
        year: i32,
        /// Gregorian month (1-12).
        month: u32,
        /// Day of month.
        day: u32,
    },

    /// The requested nth weekday or nth week does not exist in the month.
    #[error("{year}-{month:02} has no occurrence {occurrence} of {unit}")]
    RuleUnsatisfiable {
        /// Gregorian year.
        year: i32,
        /// Gregorian month (1-12).
        month: u32,
        /// Requested occurrence (1-based).
        occurrence: u32,
        /// What was being counted, e.g. `Mon` or `week`.
        unit: String,
    },

    /// A converted date that falls outside the supported Gregorian range.
    #[error("date {year}-{month:02}-{day:02} outside supported range")]
    OutOfRange {
        /// Year of the unrepresentable date.
        year: i32,
        /// Month (1-12).
        month: u32,
        /// Day of month.
        day: u32,
    },

    /// A catalogue entry that can never resolve correctly.
    #[error("invalid rule '{name}': {reason}")]
    InvalidRule {
        /// Name of the offending catalogue entry.
        name: String,
        /// Human readable reason.
        reason: String,
    },
}

pub type CalendarResult<T> = Result<T, CalendarError>;
