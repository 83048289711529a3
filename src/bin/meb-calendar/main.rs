mod cli;
mod config;
mod logging;

use std::io::{self, Write};
use std::path::Path;
use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use meb_calendar::persistence::{
    load_catalogue_from_json, save_events_to_csv, save_events_to_json, write_events_csv,
    write_events_json,
};
use meb_calendar::{Catalogue, Event, EventStore, SqliteEventStore, YearEvaluator, report};
use tracing::{info, warn};

use crate::cli::Cli;
use crate::config::{AppConfig, OutputFormat};

/// Events of one year and whether they came from the database.
struct YearCalendar {
    year: i32,
    events: Vec<Event>,
    stored: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = AppConfig::resolve(cli)?;
    let years = cli.years()?;

    let catalogue = match &config.catalogue {
        Some(path) => load_catalogue_from_json(path)
            .with_context(|| format!("loading catalogue {}", path.display()))?,
        None => Catalogue::standard(),
    };
    let evaluator = YearEvaluator::new(catalogue);

    let calendars = if cli.no_store {
        evaluator
            .evaluate_range(years)
            .into_iter()
            .map(|evaluation| {
                report_skipped(evaluation.year, evaluation.skipped.len());
                YearCalendar {
                    year: evaluation.year,
                    events: evaluation.events,
                    stored: false,
                }
            })
            .collect()
    } else {
        let store = SqliteEventStore::new(&config.database)
            .with_context(|| format!("opening database {}", config.database.display()))?;
        settle_years(&store, &evaluator, years, cli.recompute)?
    };

    render(&calendars, config.format)?;

    if let Some(path) = &cli.export {
        let all: Vec<Event> = calendars.iter().flat_map(|c| c.events.clone()).collect();
        export(&all, path)?;
        info!(path = %path.display(), count = all.len(), "exported events");
    }
    Ok(())
}

/// Evaluate and store the years that are missing (or all, when recomputing),
/// then read every year back from the store ordered by start date.
fn settle_years(
    store: &SqliteEventStore,
    evaluator: &YearEvaluator,
    years: std::ops::RangeInclusive<i32>,
    recompute: bool,
) -> Result<Vec<YearCalendar>> {
    let mut missing = Vec::new();
    for year in years.clone() {
        if recompute || !store.year_exists(year)? {
            missing.push(year);
        } else {
            info!(year, "year already stored");
        }
    }

    for evaluation in evaluator.evaluate_years(missing.clone()) {
        report_skipped(evaluation.year, evaluation.skipped.len());
        info!(year = evaluation.year, count = evaluation.events.len(), "computed events");
        store
            .save_events(evaluation.year, &evaluation.events)
            .with_context(|| format!("storing {}", evaluation.year))?;
    }

    let mut calendars = Vec::new();
    for year in years {
        let events = store
            .load_events(year)
            .with_context(|| format!("loading {year}"))?;
        calendars.push(YearCalendar {
            year,
            events,
            stored: !missing.contains(&year),
        });
    }
    Ok(calendars)
}

fn report_skipped(year: i32, skipped: usize) {
    if skipped > 0 {
        warn!(year, skipped, "some rules could not be resolved");
    }
}

fn render(calendars: &[YearCalendar], format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => {
            for calendar in calendars {
                let source = if calendar.stored { "stored" } else { "computed" };
                writeln!(
                    out,
                    "{}: {} events ({source})",
                    calendar.year,
                    calendar.events.len()
                )?;
                let table = report::render_events(&calendar.events)
                    .context("building event table")?;
                writeln!(out, "{table}")?;
            }
        }
        OutputFormat::Json => {
            let all: Vec<Event> = calendars.iter().flat_map(|c| c.events.clone()).collect();
            write_events_json(&all, &mut out)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let all: Vec<Event> = calendars.iter().flat_map(|c| c.events.clone()).collect();
            write_events_csv(&all, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn export(events: &[Event], path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => save_events_to_json(events, path)?,
        Some("csv") => save_events_to_csv(events, path)?,
        _ => bail!("export path {} must end in .json or .csv", path.display()),
    }
    Ok(())
}
