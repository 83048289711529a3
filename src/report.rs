use crate::Event;
use chrono::{Days, NaiveDate};
use polars::prelude::*;

pub const COLUMNS: [&str; 5] = ["year", "category", "name", "start_date", "end_date"];

/// Tabular view of events, one row per event in the given order.
pub fn events_to_dataframe(events: &[Event]) -> PolarsResult<DataFrame> {
    let years: Vec<i32> = events.iter().map(|e| e.year).collect();
    let categories: Vec<&str> = events.iter().map(|e| e.category.label()).collect();
    let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
    let starts: Vec<i32> = events.iter().map(|e| date_to_i32(e.start_date)).collect();
    let ends: Vec<i32> = events.iter().map(|e| date_to_i32(e.end_date)).collect();

    let columns: Vec<Column> = vec![
        Series::new(PlSmallStr::from_static("year"), years).into_column(),
        Series::new(PlSmallStr::from_static("category"), categories).into_column(),
        Series::new(PlSmallStr::from_static("name"), names).into_column(),
        Series::new(PlSmallStr::from_static("start_date"), starts)
            .cast(&DataType::Date)?
            .into_column(),
        Series::new(PlSmallStr::from_static("end_date"), ends)
            .cast(&DataType::Date)?
            .into_column(),
    ];
    DataFrame::new(columns)
}

fn cell_text(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::Date(days) => date_from_i32(*days)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        _ => av.to_string(),
    }
}

/// Render a frame as a bordered text table. Widths count characters, not
/// bytes, so Turkish names line up.
pub fn render_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default())
            .collect();
        cells.push(row);
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for row in &cells {
        for (ci, s) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(s.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, &col_names, &widths);
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

/// Shortcut for `render_table(events_to_dataframe(events))`.
pub fn render_events(events: &[Event]) -> PolarsResult<String> {
    Ok(render_table(&events_to_dataframe(events)?))
}

fn push_row(out: &mut String, row: &[String], widths: &[usize]) {
    out.push('|');
    for (s, w) in row.iter().zip(widths) {
        out.push(' ');
        out.push_str(s);
        let pad = w.saturating_sub(s.chars().count());
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push_str(" |");
    }
    out.push('\n');
}

// Polars stores `Date` as days since 1970-01-01, which is `NaiveDate::default()`.
fn epoch() -> NaiveDate {
    NaiveDate::default()
}

fn date_to_i32(date: NaiveDate) -> i32 {
    (date - epoch()).num_days() as i32
}

fn date_from_i32(days: i32) -> Option<NaiveDate> {
    if days >= 0 {
        epoch().checked_add_days(Days::new(days as u64))
    } else {
        epoch().checked_sub_days(Days::new(days.unsigned_abs() as u64))
    }
}
