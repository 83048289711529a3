use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};
use meb_calendar::{
    CalendarError, Catalogue, CatalogueEntry, Category, Event, HolidayRule, YearEvaluator,
    evaluate,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn named<'a>(events: &'a [Event], name: &str) -> Vec<&'a Event> {
    events.iter().filter(|e| e.name == name).collect()
}

#[test]
fn new_year_2024_is_single_official_day() {
    let events = evaluate(2024);
    let new_year = named(&events, "Yılbaşı");
    assert_eq!(new_year.len(), 1);
    assert_eq!(new_year[0].category, Category::Official);
    assert_eq!(new_year[0].start_date, d(2024, 1, 1));
    assert_eq!(new_year[0].end_date, d(2024, 1, 1));
}

#[test]
fn ramazan_bayrami_2024_with_eve() {
    let events = evaluate(2024);

    let holiday = named(&events, "Ramazan Bayramı");
    assert_eq!(holiday.len(), 1);
    assert_eq!(holiday[0].start_date, d(2024, 4, 10));
    assert_eq!(holiday[0].end_date, d(2024, 4, 12));
    assert_eq!(holiday[0].category, Category::Official);

    let eve = named(&events, "Ramazan Bayramı Arefesi");
    assert_eq!(eve.len(), 1);
    assert_eq!(eve[0].start_date, d(2024, 4, 9));
    assert_eq!(eve[0].end_date, d(2024, 4, 9));
}

#[test]
fn kurban_bayrami_2024_spans_four_days() {
    let events = evaluate(2024);
    let holiday = named(&events, "Kurban Bayramı");
    assert_eq!(holiday.len(), 1);
    assert_eq!(holiday[0].start_date, d(2024, 6, 17));
    assert_eq!(holiday[0].end_date, d(2024, 6, 20));
    assert_eq!(holiday[0].duration_days(), 4);
    assert_eq!(named(&events, "Kurban Bayramı Arefesi")[0].start_date, d(2024, 6, 16));
}

#[test]
fn mid_year_break_2025() {
    let events = evaluate(2025);
    let break_ = named(&events, "Yarıyıl Tatili");
    assert_eq!(break_.len(), 1);
    assert_eq!(break_[0].start_date, d(2025, 1, 27));
    assert_eq!(break_[0].end_date, d(2025, 2, 9));
    assert_eq!(break_[0].category, Category::School);
}

#[test]
fn schools_open_second_monday_of_september_2025() {
    let events = evaluate(2025);
    let opening = named(&events, "Okulların Açılması");
    assert_eq!(opening.len(), 1);
    assert_eq!(opening[0].start_date, d(2025, 9, 8));
    assert_eq!(opening[0].end_date, d(2025, 9, 8));
}

#[test]
fn summer_break_starts_day_after_second_friday() {
    // Second Friday of June 2025 is the 13th.
    let events = evaluate(2025);
    assert_eq!(named(&events, "Yaz Tatili Başlangıcı")[0].start_date, d(2025, 6, 14));
}

#[test]
fn kurban_straddling_new_year_is_dropped_from_both_years() {
    // 10 Dhu al-Hijjah 1427 falls on 2006-12-31, its last day on 2007-01-03.
    let events_2006 = evaluate(2006);
    let kurban_2006 = named(&events_2006, "Kurban Bayramı");
    assert_eq!(kurban_2006.len(), 1);
    assert_eq!(kurban_2006[0].start_date, d(2006, 1, 10));
    assert!(
        named(&events_2006, "Kurban Bayramı Arefesi")
            .iter()
            .all(|e| e.start_date != d(2006, 12, 30))
    );

    let events_2007 = evaluate(2007);
    let kurban_2007 = named(&events_2007, "Kurban Bayramı");
    assert_eq!(kurban_2007.len(), 1);
    assert_eq!(kurban_2007[0].start_date, d(2007, 12, 20));
    assert!(
        named(&events_2007, "Kurban Bayramı Arefesi")
            .iter()
            .all(|e| e.start_date == d(2007, 12, 19))
    );
}

#[test]
fn lunar_holiday_can_occur_twice_in_one_year() {
    let events = evaluate(2000);
    let starts: Vec<NaiveDate> = named(&events, "Ramazan Bayramı")
        .iter()
        .map(|e| e.start_date)
        .collect();
    assert_eq!(starts, vec![d(2000, 1, 8), d(2000, 12, 28)]);

    let eves: Vec<NaiveDate> = named(&events, "Ramazan Bayramı Arefesi")
        .iter()
        .map(|e| e.start_date)
        .collect();
    assert_eq!(eves, vec![d(2000, 1, 7), d(2000, 12, 27)]);
}

#[test]
fn standard_year_has_every_entry() {
    let events = evaluate(2024);
    assert_eq!(events.len(), 50);
    let count = |category| events.iter().filter(|e| e.category == category).count();
    assert_eq!(count(Category::Official), 11);
    assert_eq!(count(Category::School), 5);
    assert_eq!(count(Category::Commemorative), 34);
}

#[test]
fn output_is_grouped_by_category_in_catalogue_order() {
    let events = evaluate(2024);
    let order: Vec<usize> = events
        .iter()
        .map(|e| Category::ALL.iter().position(|c| *c == e.category).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(events[0].name, "Yılbaşı");

    let school: Vec<&str> = events
        .iter()
        .filter(|e| e.category == Category::School)
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(
        school,
        vec![
            "Yarıyıl Tatili",
            "İkinci Ara Tatil",
            "Yaz Tatili Başlangıcı",
            "Okulların Açılması",
            "Birinci Ara Tatil"
        ]
    );
}

#[test]
fn evaluation_is_deterministic() {
    for year in [1999, 2024, 2031] {
        assert_eq!(evaluate(year), evaluate(year));
    }
}

#[test]
fn events_are_well_formed_across_two_centuries() {
    let evaluator = YearEvaluator::default();
    for evaluation in evaluator.evaluate_range(1900..=2100) {
        let year = evaluation.year;
        assert!(evaluation.skipped.is_empty(), "{year}: {:?}", evaluation.skipped);

        let mut seen = HashSet::new();
        for event in &evaluation.events {
            assert_eq!(event.year, year);
            assert!(event.start_date <= event.end_date, "{event:?}");
            assert!(
                seen.insert((event.name.clone(), event.start_date)),
                "duplicate {event:?}"
            );
        }

        // Every lunar group stays inside the year and appears at least once.
        for name in [
            "Ramazan Bayramı",
            "Ramazan Bayramı Arefesi",
            "Kurban Bayramı",
            "Kurban Bayramı Arefesi",
        ] {
            let found = named(&evaluation.events, name);
            assert!(!found.is_empty(), "{name} missing in {year}");
            for event in found {
                assert_eq!(event.start_date.year(), year);
                assert_eq!(event.end_date.year(), year);
            }
        }
    }
}

#[test]
fn weekday_and_week_rules_land_on_expected_days() {
    let catalogue = Catalogue::standard();
    let evaluator = YearEvaluator::new(catalogue.clone());
    for year in 2020..=2030 {
        let events = evaluator.evaluate(year);
        for entry in catalogue.entries() {
            let Some(event) = events.iter().find(|e| e.name == entry.name) else {
                continue;
            };
            match entry.rule {
                HolidayRule::NthWeekdayOfMonth {
                    weekday,
                    offset_days: 0,
                    ..
                } => assert_eq!(event.start_date.weekday(), weekday, "{}", entry.name),
                _ if entry.rule.is_week_anchored() => {
                    assert_eq!(event.start_date.weekday(), Weekday::Mon, "{}", entry.name);
                    assert_eq!(event.end_date.weekday(), Weekday::Sun, "{}", entry.name);
                }
                _ => {}
            }
        }
    }
}

#[test]
fn week_containing_may_start_in_previous_year() {
    // 2026-03-01 is a Sunday, 2027-03-01 a Monday.
    let events = evaluate(2026);
    let yesilay = named(&events, "Yeşilay Haftası");
    assert_eq!(yesilay[0].start_date, d(2026, 2, 23));
    assert_eq!(yesilay[0].end_date, d(2026, 3, 1));
    assert_eq!(named(&evaluate(2027), "Yeşilay Haftası")[0].start_date, d(2027, 3, 1));
}

#[test]
fn fixed_ranges_use_inclusive_length() {
    let events = evaluate(2024);
    let orman = named(&events, "Orman Haftası");
    assert_eq!(orman[0].start_date, d(2024, 3, 21));
    assert_eq!(orman[0].end_date, d(2024, 3, 26));
    let turizm = named(&events, "Turizm Haftası");
    assert_eq!(turizm[0].end_date, d(2024, 4, 22));
}

#[test]
fn unsatisfiable_rule_is_skipped_and_reported() {
    let catalogue = Catalogue::new(vec![
        CatalogueEntry::new(
            "Fifth Monday",
            Category::School,
            HolidayRule::NthWeekdayOfMonth {
                month: 2,
                weekday: Weekday::Mon,
                occurrence: 5,
                offset_days: 0,
                span_days: 0,
            },
        ),
        CatalogueEntry::new(
            "Spring Day",
            Category::Commemorative,
            HolidayRule::FixedGregorian {
                month: 3,
                day: 21,
                span_days: 0,
            },
        ),
    ]);
    let evaluation = YearEvaluator::new(catalogue).evaluate_detailed(2025);

    assert_eq!(evaluation.events.len(), 1);
    assert_eq!(evaluation.events[0].name, "Spring Day");
    assert_eq!(evaluation.skipped.len(), 1);
    assert_eq!(evaluation.skipped[0].name, "Fifth Monday");
    assert!(matches!(
        evaluation.skipped[0].error,
        CalendarError::RuleUnsatisfiable { occurrence: 5, .. }
    ));
}

#[test]
fn invalid_rule_in_unvalidated_catalogue_is_skipped() {
    let catalogue = Catalogue::new(vec![
        CatalogueEntry::new(
            "Backwards",
            Category::Commemorative,
            HolidayRule::FixedGregorian {
                month: 3,
                day: 10,
                span_days: -2,
            },
        ),
        CatalogueEntry::new(
            "Negative Eve",
            Category::Official,
            HolidayRule::LunarAnchored {
                hijri_month: 10,
                hijri_day: 1,
                eve_days: -1,
                span_days: 2,
            },
        ),
        CatalogueEntry::new(
            "Spring Day",
            Category::Commemorative,
            HolidayRule::FixedGregorian {
                month: 3,
                day: 21,
                span_days: 0,
            },
        ),
    ]);
    let evaluation = YearEvaluator::new(catalogue).evaluate_detailed(2025);

    assert_eq!(evaluation.events.len(), 1);
    assert_eq!(evaluation.events[0].name, "Spring Day");
    let skipped: Vec<&str> = evaluation.skipped.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(skipped, vec!["Negative Eve", "Backwards"]);
    assert!(
        evaluation
            .skipped
            .iter()
            .all(|s| matches!(s.error, CalendarError::InvalidRule { .. }))
    );
}

#[test]
fn leap_day_rule_only_resolves_in_leap_years() {
    let catalogue = Catalogue::new(vec![CatalogueEntry::new(
        "Leap Day",
        Category::Commemorative,
        HolidayRule::FixedGregorian {
            month: 2,
            day: 29,
            span_days: 0,
        },
    )]);
    let evaluator = YearEvaluator::new(catalogue);
    assert_eq!(evaluator.evaluate(2024).len(), 1);
    let evaluation = evaluator.evaluate_detailed(2025);
    assert!(evaluation.events.is_empty());
    assert_eq!(evaluation.skipped.len(), 1);
}

#[test]
fn custom_eve_name_is_used() {
    let catalogue = Catalogue::new(vec![
        CatalogueEntry::new(
            "Bayram",
            Category::Official,
            HolidayRule::LunarAnchored {
                hijri_month: 10,
                hijri_day: 1,
                eve_days: 1,
                span_days: 0,
            },
        )
        .with_eve_name("Bayram Eve"),
    ]);
    let events = YearEvaluator::new(catalogue).evaluate(2024);
    let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Bayram Eve", "Bayram"]);
    assert_eq!(events[1].start_date, d(2024, 4, 10));
    assert_eq!(events[1].end_date, d(2024, 4, 10));
}

#[test]
fn evaluate_years_returns_year_order() {
    let evaluator = YearEvaluator::default();
    let years: Vec<i32> = evaluator
        .evaluate_years(vec![2030, 2024, 2027])
        .into_iter()
        .map(|e| e.year)
        .collect();
    assert_eq!(years, vec![2024, 2027, 2030]);
}
