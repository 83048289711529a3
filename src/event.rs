use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Official,
    School,
    Commemorative,
}

impl Category {
    /// Output group order of an evaluation run.
    pub const ALL: [Category; 3] = [Category::Official, Category::School, Category::Commemorative];

    /// Stable key used in storage and files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Official => "official",
            Category::School => "school",
            Category::Commemorative => "commemorative",
        }
    }

    /// Label as printed on the national calendar.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Official => "Resmi Tatil",
            Category::School => "Okul Tatili",
            Category::Commemorative => "Belirli Gün ve Hafta",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "official" | "Resmi Tatil" => Ok(Category::Official),
            "school" | "Okul Tatili" => Ok(Category::School),
            "commemorative" | "Belirli Gün ve Hafta" => Ok(Category::Commemorative),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// A resolved calendar event. `start_date..=end_date` is inclusive; a range
/// may spill into the adjacent year for week-long observances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub category: Category,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub year: i32,
}

impl Event {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        start_date: NaiveDate,
        end_date: NaiveDate,
        year: i32,
    ) -> Self {
        debug_assert!(start_date <= end_date, "event range must not be inverted");
        Self {
            name: name.into(),
            category,
            start_date,
            end_date,
            year,
        }
    }

    pub fn single_day(name: impl Into<String>, category: Category, date: NaiveDate, year: i32) -> Self {
        Self::new(name, category, date, date, year)
    }

    /// Inclusive length in days.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
