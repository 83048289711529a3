//! Resolves a catalogue against a Gregorian year.

use crate::calendar::offset_days;
use crate::catalogue::{Catalogue, CatalogueEntry};
use crate::error::{CalendarError, CalendarResult};
use crate::event::{Category, Event};
use crate::hijri;
use crate::rule::HolidayRule;
use chrono::{Datelike, NaiveDate};
use rayon::prelude::*;
use std::collections::HashSet;
use std::ops::RangeInclusive;
use tracing::{debug, warn};

/// A catalogue entry (or one lunar candidate of it) that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRule {
    pub name: String,
    pub error: CalendarError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearEvaluation {
    pub year: i32,
    pub events: Vec<Event>,
    pub skipped: Vec<SkippedRule>,
}

#[derive(Debug, Clone, Default)]
pub struct YearEvaluator {
    catalogue: Catalogue,
}

impl YearEvaluator {
    pub fn new(catalogue: Catalogue) -> Self {
        Self { catalogue }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn evaluate(&self, year: i32) -> Vec<Event> {
        self.evaluate_detailed(year).events
    }

    /// Evaluate every entry for `year`. Entries that fail validation or cannot
    /// resolve are skipped and reported; the rest of the catalogue is still
    /// evaluated.
    pub fn evaluate_detailed(&self, year: i32) -> YearEvaluation {
        let mut events = Vec::with_capacity(self.catalogue.len() + 4);
        let mut skipped = Vec::new();
        let mut lunar_seen: HashSet<(String, NaiveDate)> = HashSet::new();

        for category in Category::ALL {
            for entry in self.catalogue.in_category(category) {
                if let Err(error) = entry.validate() {
                    warn!(name = %entry.name, year, %error, "skipping invalid rule");
                    skipped.push(SkippedRule {
                        name: entry.name.clone(),
                        error,
                    });
                    continue;
                }

                if let HolidayRule::LunarAnchored {
                    hijri_month,
                    hijri_day,
                    eve_days,
                    span_days,
                } = entry.rule
                {
                    let lunar = LunarHoliday {
                        hijri_month,
                        hijri_day,
                        eve_days,
                        span_days,
                    };
                    for event in self.resolve_lunar(entry, &lunar, year, &mut skipped) {
                        if lunar_seen.insert((event.name.clone(), event.start_date)) {
                            events.push(event);
                        } else {
                            debug!(name = %event.name, start = %event.start_date, "dropping duplicate lunar event");
                        }
                    }
                    continue;
                }

                match entry.rule.gregorian_span(year) {
                    Ok(Some((start, end))) => {
                        events.push(Event::new(entry.name.clone(), category, start, end, year));
                    }
                    Ok(None) => {}
                    Err(error) => {
                        warn!(name = %entry.name, year, %error, "skipping rule");
                        skipped.push(SkippedRule {
                            name: entry.name.clone(),
                            error,
                        });
                    }
                }
            }
        }

        YearEvaluation {
            year,
            events,
            skipped,
        }
    }

    /// Evaluate several years in parallel; results come back in year order.
    pub fn evaluate_years<I>(&self, years: I) -> Vec<YearEvaluation>
    where
        I: IntoParallelIterator<Item = i32>,
    {
        let mut evaluations: Vec<YearEvaluation> = years
            .into_par_iter()
            .map(|year| self.evaluate_detailed(year))
            .collect();
        evaluations.sort_by_key(|e| e.year);
        evaluations
    }

    pub fn evaluate_range(&self, years: RangeInclusive<i32>) -> Vec<YearEvaluation> {
        self.evaluate_years(years)
    }

    /// Test the anchor Hijri year and its neighbours, keeping only the groups
    /// that fall entirely inside `year`.
    fn resolve_lunar(
        &self,
        entry: &CatalogueEntry,
        lunar: &LunarHoliday,
        year: i32,
        skipped: &mut Vec<SkippedRule>,
    ) -> Vec<Event> {
        let anchor = match hijri::anchor_hijri_year(year) {
            Ok(anchor) => anchor,
            Err(error) => {
                warn!(name = %entry.name, year, %error, "skipping lunar rule");
                skipped.push(SkippedRule {
                    name: entry.name.clone(),
                    error,
                });
                return Vec::new();
            }
        };

        let mut events = Vec::new();
        for hijri_year in [anchor - 1, anchor, anchor + 1] {
            let group = match lunar.group(hijri_year) {
                Ok(group) => group,
                Err(error) => {
                    warn!(name = %entry.name, hijri_year, %error, "skipping lunar candidate");
                    skipped.push(SkippedRule {
                        name: entry.name.clone(),
                        error,
                    });
                    continue;
                }
            };

            if group.eve_start.year() != year || group.end.year() != year {
                debug!(
                    name = %entry.name,
                    hijri_year,
                    start = %group.start,
                    "candidate not contained in target year"
                );
                continue;
            }

            if let Some(eve_end) = group.eve_end {
                events.push(Event::new(
                    entry.eve_name(),
                    entry.category,
                    group.eve_start,
                    eve_end,
                    year,
                ));
            }
            events.push(Event::new(
                entry.name.clone(),
                entry.category,
                group.start,
                group.end,
                year,
            ));
        }
        events
    }
}

struct LunarHoliday {
    hijri_month: u32,
    hijri_day: u32,
    eve_days: i64,
    span_days: i64,
}

/// Gregorian dates of one lunar holiday occurrence.
struct LunarGroup {
    eve_start: NaiveDate,
    eve_end: Option<NaiveDate>,
    start: NaiveDate,
    end: NaiveDate,
}

impl LunarHoliday {
    fn group(&self, hijri_year: i32) -> CalendarResult<LunarGroup> {
        let start = hijri::hijri_to_gregorian(hijri_year, self.hijri_month, self.hijri_day)?;
        let end = offset_days(start, self.span_days)?;
        let eve_start = offset_days(start, -self.eve_days)?;
        let eve_end = if self.eve_days > 0 {
            Some(offset_days(start, -1)?)
        } else {
            None
        };
        Ok(LunarGroup {
            eve_start,
            eve_end,
            start,
            end,
        })
    }
}

/// Evaluate the standard national catalogue for a year.
pub fn evaluate(year: i32) -> Vec<Event> {
    YearEvaluator::default().evaluate(year)
}
