use std::io::Write;

use chrono::Weekday;
use meb_calendar::persistence::load_catalogue_from_json;
use meb_calendar::{
    CalendarError, Catalogue, CatalogueEntry, Category, HolidayRule, PersistenceError,
    YearEvaluator,
};
use tempfile::NamedTempFile;

#[test]
fn standard_catalogue_is_valid() {
    let catalogue = Catalogue::standard();
    catalogue.validate().unwrap();
    assert_eq!(catalogue.len(), 48);
    assert_eq!(catalogue.in_category(Category::Official).count(), 9);
    assert_eq!(catalogue.in_category(Category::School).count(), 5);
    assert_eq!(catalogue.in_category(Category::Commemorative).count(), 34);
    assert_eq!(Catalogue::default(), catalogue);
}

#[test]
fn lunar_entries_default_eve_name() {
    let catalogue = Catalogue::standard();
    let kurban = catalogue.find("Kurban Bayramı").unwrap();
    assert!(kurban.rule.is_lunar());
    assert_eq!(kurban.eve_name(), "Kurban Bayramı Arefesi");
    assert!(catalogue.find("Kütüphaneler Haftası").unwrap().rule.is_week_anchored());
    assert!(catalogue.find("Not An Entry").is_none());
}

fn entry(rule: HolidayRule) -> CatalogueEntry {
    CatalogueEntry::new("Test", Category::Commemorative, rule)
}

#[test]
fn impossible_entries_are_rejected() {
    let cases = [
        HolidayRule::FixedGregorian {
            month: 13,
            day: 1,
            span_days: 0,
        },
        HolidayRule::FixedGregorian {
            month: 4,
            day: 31,
            span_days: 0,
        },
        HolidayRule::FixedGregorian {
            month: 4,
            day: 1,
            span_days: -1,
        },
        HolidayRule::LunarAnchored {
            hijri_month: 10,
            hijri_day: 31,
            eve_days: 1,
            span_days: 2,
        },
        HolidayRule::NthWeekdayOfMonth {
            month: 6,
            weekday: Weekday::Fri,
            occurrence: 0,
            offset_days: 0,
            span_days: 0,
        },
        HolidayRule::NthWeekOfMonth {
            month: 5,
            week: 6,
            span_days: 6,
        },
        HolidayRule::FixedRange {
            month: 3,
            day: 8,
            length_days: 0,
        },
    ];
    for rule in cases {
        let err = entry(rule.clone()).validate().unwrap_err();
        assert!(
            matches!(err, CalendarError::InvalidRule { .. }),
            "{rule:?} gave {err:?}"
        );
    }

    // February 29 exists in some years.
    entry(HolidayRule::FixedGregorian {
        month: 2,
        day: 29,
        span_days: 0,
    })
    .validate()
    .unwrap();
}

#[test]
fn duplicate_names_are_rejected_per_category() {
    let rule = HolidayRule::FixedGregorian {
        month: 1,
        day: 1,
        span_days: 0,
    };
    let duplicate = Catalogue::new(vec![entry(rule.clone()), entry(rule.clone())]);
    assert!(duplicate.validate().is_err());

    let across = Catalogue::new(vec![
        entry(rule.clone()),
        CatalogueEntry::new("Test", Category::School, rule),
    ]);
    across.validate().unwrap();
}

#[test]
fn catalogue_loads_from_json() {
    let json = r#"{
        "entries": [
            {
                "name": "Bahar Şenliği",
                "category": "commemorative",
                "rule": { "kind": "fixed_range", "month": 5, "day": 1, "length_days": 3 }
            },
            {
                "name": "Karne Günü",
                "category": "school",
                "rule": {
                    "kind": "nth_weekday_of_month",
                    "month": 6,
                    "weekday": "Fri",
                    "occurrence": 2,
                    "span_days": 0
                }
            }
        ]
    }"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let catalogue = load_catalogue_from_json(file.path()).unwrap();
    assert_eq!(catalogue.len(), 2);
    assert_eq!(
        catalogue.entries()[1].rule,
        HolidayRule::NthWeekdayOfMonth {
            month: 6,
            weekday: Weekday::Fri,
            occurrence: 2,
            offset_days: 0,
            span_days: 0,
        }
    );

    let events = YearEvaluator::new(catalogue).evaluate(2025);
    let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Karne Günü", "Bahar Şenliği"]);
}

#[test]
fn invalid_catalogue_file_is_rejected() {
    let json = r#"{"entries":[{"name":"Bad","category":"official","rule":{"kind":"fixed_gregorian","month":2,"day":30,"span_days":0}}]}"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    assert!(matches!(
        load_catalogue_from_json(file.path()),
        Err(PersistenceError::Catalogue(CalendarError::InvalidRule { .. }))
    ));
}

#[test]
fn standard_catalogue_survives_serialization() {
    let catalogue = Catalogue::standard();
    let json = serde_json::to_string(&catalogue).unwrap();
    let back: Catalogue = serde_json::from_str(&json).unwrap();
    assert_eq!(back, catalogue);
}
