//! The table of observances evaluated each year.
//!
//! Adding or removing an observance is a row change here (or in a catalogue
//! JSON file); the evaluator never needs to change.

use crate::error::{CalendarError, CalendarResult};
use crate::event::Category;
use crate::hijri;
use crate::rule::HolidayRule;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Span of a single-day observance.
const SINGLE_DAY: i64 = 0;
/// Span from a Monday to the closing Sunday.
const WEEK: i64 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub name: String,
    pub category: Category,
    /// Name of the eve event for lunar rules; defaults to "<name> Arefesi".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eve_name: Option<String>,
    pub rule: HolidayRule,
}

impl CatalogueEntry {
    pub fn new(name: impl Into<String>, category: Category, rule: HolidayRule) -> Self {
        Self {
            name: name.into(),
            category,
            eve_name: None,
            rule,
        }
    }

    pub fn with_eve_name(mut self, eve_name: impl Into<String>) -> Self {
        self.eve_name = Some(eve_name.into());
        self
    }

    pub fn eve_name(&self) -> String {
        self.eve_name
            .clone()
            .unwrap_or_else(|| format!("{} Arefesi", self.name))
    }

    fn invalid(&self, reason: impl Into<String>) -> CalendarError {
        CalendarError::InvalidRule {
            name: self.name.clone(),
            reason: reason.into(),
        }
    }

    /// Reject entries that can never resolve, independent of the year.
    pub fn validate(&self) -> CalendarResult<()> {
        if self.name.trim().is_empty() {
            return Err(self.invalid("name must not be empty"));
        }
        let check_month = |month: u32| {
            if (1..=12).contains(&month) {
                Ok(())
            } else {
                Err(self.invalid(format!("month {month} is outside 1..=12")))
            }
        };
        let check_span = |span: i64| {
            if span >= 0 {
                Ok(())
            } else {
                Err(self.invalid(format!("span {span} is negative")))
            }
        };
        // Any month/day pair that exists in a leap year is accepted.
        let check_day = |month: u32, day: u32| {
            check_month(month)?;
            NaiveDate::from_ymd_opt(2000, month, day)
                .map(|_| ())
                .ok_or_else(|| self.invalid(format!("day {day} does not exist in month {month}")))
        };

        match self.rule {
            HolidayRule::FixedGregorian { month, day, span_days } => {
                check_day(month, day)?;
                check_span(span_days)
            }
            HolidayRule::LunarAnchored {
                hijri_month,
                hijri_day,
                eve_days,
                span_days,
            } => {
                if !(1..=12).contains(&hijri_month) {
                    return Err(self.invalid(format!("hijri month {hijri_month} is outside 1..=12")));
                }
                // 30 is only valid in some years; the converter reports those per year.
                if hijri_day == 0 || hijri_day > 30 {
                    return Err(self.invalid(format!("hijri day {hijri_day} is outside 1..=30")));
                }
                check_span(eve_days)?;
                check_span(span_days)
            }
            HolidayRule::NthWeekdayOfMonth {
                month,
                occurrence,
                span_days,
                ..
            } => {
                check_month(month)?;
                if !(1..=5).contains(&occurrence) {
                    return Err(self.invalid(format!("occurrence {occurrence} is outside 1..=5")));
                }
                check_span(span_days)
            }
            HolidayRule::NthWeekOfMonth { month, week, span_days } => {
                check_month(month)?;
                if !(1..=5).contains(&week) {
                    return Err(self.invalid(format!("week {week} is outside 1..=5")));
                }
                check_span(span_days)
            }
            HolidayRule::WeekContaining { month, day, span_days } => {
                check_day(month, day)?;
                check_span(span_days)
            }
            HolidayRule::LastWeekOfMonth { month, span_days } => {
                check_month(month)?;
                check_span(span_days)
            }
            HolidayRule::FixedRange { month, day, length_days } => {
                check_day(month, day)?;
                if length_days < 1 {
                    return Err(self.invalid(format!("length {length_days} must be at least 1")));
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    entries: Vec<CatalogueEntry>,
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalogue {
    pub fn new(entries: Vec<CatalogueEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &CatalogueEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn find(&self, name: &str) -> Option<&CatalogueEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Validate every entry and make sure event names are unique per category.
    pub fn validate(&self) -> CalendarResult<()> {
        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            entry.validate()?;
            if !seen.insert((entry.category, entry.name.clone())) {
                return Err(entry.invalid("duplicate name within category"));
            }
            if let HolidayRule::LunarAnchored { eve_days, .. } = entry.rule {
                if eve_days > 0 && !seen.insert((entry.category, entry.eve_name())) {
                    return Err(entry.invalid("eve name collides with another entry"));
                }
            }
        }
        Ok(())
    }

    /// The national calendar: official holidays, estimated school breaks and
    /// commemorative days/weeks.
    pub fn standard() -> Self {
        let mut entries = Vec::with_capacity(48);
        entries.extend(official_entries());
        entries.extend(school_entries());
        entries.extend(commemorative_entries());
        Self { entries }
    }
}

fn fixed(name: &str, category: Category, month: u32, day: u32) -> CatalogueEntry {
    CatalogueEntry::new(
        name,
        category,
        HolidayRule::FixedGregorian {
            month,
            day,
            span_days: SINGLE_DAY,
        },
    )
}

fn range(name: &str, month: u32, day: u32, length_days: i64) -> CatalogueEntry {
    CatalogueEntry::new(
        name,
        Category::Commemorative,
        HolidayRule::FixedRange {
            month,
            day,
            length_days,
        },
    )
}

fn nth_week(name: &str, month: u32, week: u32) -> CatalogueEntry {
    CatalogueEntry::new(
        name,
        Category::Commemorative,
        HolidayRule::NthWeekOfMonth {
            month,
            week,
            span_days: WEEK,
        },
    )
}

fn week_containing(name: &str, month: u32, day: u32) -> CatalogueEntry {
    CatalogueEntry::new(
        name,
        Category::Commemorative,
        HolidayRule::WeekContaining {
            month,
            day,
            span_days: WEEK,
        },
    )
}

fn school_break(
    name: &str,
    month: u32,
    weekday: Weekday,
    occurrence: u32,
    offset_days: i64,
    span_days: i64,
) -> CatalogueEntry {
    CatalogueEntry::new(
        name,
        Category::School,
        HolidayRule::NthWeekdayOfMonth {
            month,
            weekday,
            occurrence,
            offset_days,
            span_days,
        },
    )
}

fn official_entries() -> Vec<CatalogueEntry> {
    let official = Category::Official;
    vec![
        fixed("Yılbaşı", official, 1, 1),
        fixed("Ulusal Egemenlik ve Çocuk Bayramı", official, 4, 23),
        fixed("Emek ve Dayanışma Günü", official, 5, 1),
        fixed("Atatürk'ü Anma, Gençlik ve Spor Bayramı", official, 5, 19),
        fixed("Demokrasi ve Milli Birlik Günü", official, 7, 15),
        fixed("Zafer Bayramı", official, 8, 30),
        fixed("Cumhuriyet Bayramı", official, 10, 29),
        CatalogueEntry::new(
            "Ramazan Bayramı",
            official,
            HolidayRule::LunarAnchored {
                hijri_month: hijri::SHAWWAL,
                hijri_day: 1,
                eve_days: 1,
                span_days: 2,
            },
        ),
        CatalogueEntry::new(
            "Kurban Bayramı",
            official,
            HolidayRule::LunarAnchored {
                hijri_month: hijri::DHU_AL_HIJJAH,
                hijri_day: 10,
                eve_days: 1,
                span_days: 3,
            },
        ),
    ]
}

// Estimates of the ministry's academic calendar; revisit when it changes.
fn school_entries() -> Vec<CatalogueEntry> {
    use Weekday::{Fri, Mon};
    vec![
        school_break("Yarıyıl Tatili", 1, Mon, 4, 0, 13),
        school_break("İkinci Ara Tatil", 4, Mon, 2, 0, 4),
        // Day after the second Friday of June.
        school_break("Yaz Tatili Başlangıcı", 6, Fri, 2, 1, SINGLE_DAY),
        school_break("Okulların Açılması", 9, Mon, 2, 0, SINGLE_DAY),
        school_break("Birinci Ara Tatil", 11, Mon, 2, 0, 4),
    ]
}

fn commemorative_entries() -> Vec<CatalogueEntry> {
    let single = |name: &str, month: u32, day: u32| fixed(name, Category::Commemorative, month, day);
    vec![
        // January
        nth_week("Enerji Tasarrufu Haftası", 1, 2),
        nth_week("Veremle Savaş Eğitimi Haftası", 1, 1),
        // March
        week_containing("Yeşilay Haftası", 3, 1),
        nth_week("Girişimcilik Haftası", 3, 1),
        single("8 Mart Dünya Kadınlar Günü", 3, 8),
        range("Bilim ve Teknoloji Haftası", 3, 8, 7),
        single(
            "12 Mart İstiklâl Marşı'nın Kabulü ve Mehmet Akif Ersoy'u Anma Günü",
            3,
            12,
        ),
        range("Tüketiciyi Koruma Haftası", 3, 15, 7),
        single("18 Mart Şehitler Günü", 3, 18),
        range("Yaşlılara Saygı Haftası", 3, 18, 7),
        week_containing("Türk Dünyası ve Toplulukları Haftası", 3, 21),
        range("Orman Haftası", 3, 21, 6),
        CatalogueEntry::new(
            "Kütüphaneler Haftası",
            Category::Commemorative,
            HolidayRule::LastWeekOfMonth {
                month: 3,
                span_days: WEEK,
            },
        ),
        // April
        range("Kanser Haftası", 4, 1, 7),
        range("Turizm Haftası", 4, 15, 8),
        // May
        nth_week("Trafik ve İlkyardım Haftası", 5, 1),
        nth_week("Vakıflar Haftası", 5, 2),
        range("Engelliler Haftası", 5, 10, 7),
        range("Müzeler Haftası", 5, 18, 7),
        // September
        nth_week("İlköğretim Haftası", 9, 3),
        single("Gaziler Günü", 9, 19),
        // October
        single("Hayvanları Koruma Günü", 10, 4),
        single("Birleşmiş Milletler Günü", 10, 24),
        range("Kızılay Haftası", 10, 29, 7),
        // November
        range("Organ Bağışı ve Nakli Haftası", 11, 3, 7),
        range("Lösemili Çocuklar Haftası", 11, 2, 7),
        range("Atatürk Haftası", 11, 10, 7),
        single("Afet Eğitimi Hazırlık Günü", 11, 12),
        single("Dünya Diyabet Günü", 11, 14),
        single("Öğretmenler Günü", 11, 24),
        range("Ağız ve Diş Sağlığı Haftası", 11, 22, 6),
        // December
        single("Dünya Engelliler Günü", 12, 3),
        week_containing("İnsan Hakları ve Demokrasi Haftası", 12, 10),
        range(
            "Tutum, Yatırım ve Türk Malları Haftası (Yerli Malı Haftası)",
            12,
            12,
            7,
        ),
    ]
}
