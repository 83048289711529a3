use super::{PersistenceError, PersistenceResult};
use crate::catalogue::Catalogue;
use crate::{Category, Event};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Serialize, Deserialize)]
struct EventsSnapshot {
    events: Vec<Event>,
}

pub fn write_events_json<W: Write>(events: &[Event], writer: W) -> PersistenceResult<()> {
    super::validate_events(events)?;
    let snapshot = EventsSnapshot {
        events: events.to_vec(),
    };
    serde_json::to_writer_pretty(writer, &snapshot)?;
    Ok(())
}

pub fn save_events_to_json<P: AsRef<Path>>(events: &[Event], path: P) -> PersistenceResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_events_json(events, &mut writer)?;
    writer.flush()?;
    Ok(())
}

pub fn load_events_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Event>> {
    let file = File::open(path)?;
    let snapshot: EventsSnapshot = serde_json::from_reader(BufReader::new(file))?;
    super::validate_events(&snapshot.events)?;
    Ok(snapshot.events)
}

/// Read a catalogue file and validate it before use.
pub fn load_catalogue_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Catalogue> {
    let file = File::open(path)?;
    let catalogue: Catalogue = serde_json::from_reader(BufReader::new(file))?;
    catalogue.validate()?;
    Ok(catalogue)
}

#[derive(Default, Serialize, Deserialize)]
struct EventCsvRecord {
    year: i32,
    category: String,
    name: String,
    start_date: String,
    end_date: String,
}

impl From<&Event> for EventCsvRecord {
    fn from(event: &Event) -> Self {
        Self {
            year: event.year,
            category: event.category.as_str().to_string(),
            name: event.name.clone(),
            start_date: format_date(event.start_date),
            end_date: format_date(event.end_date),
        }
    }
}

impl EventCsvRecord {
    fn into_event(self) -> PersistenceResult<Event> {
        let category = Category::from_str(&self.category)
            .map_err(|e| PersistenceError::InvalidData(e.to_string()))?;
        Ok(Event {
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            name: self.name,
            category,
            year: self.year,
        })
    }
}

pub fn write_events_csv<W: Write>(events: &[Event], writer: W) -> PersistenceResult<()> {
    super::validate_events(events)?;
    let mut writer = csv::Writer::from_writer(writer);
    for event in events {
        writer.serialize(EventCsvRecord::from(event))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_events_to_csv<P: AsRef<Path>>(events: &[Event], path: P) -> PersistenceResult<()> {
    write_events_csv(events, File::create(path)?)
}

pub fn read_events_csv<R: Read>(reader: R) -> PersistenceResult<Vec<Event>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut events = Vec::new();
    for record in reader.deserialize::<EventCsvRecord>() {
        events.push(record?.into_event()?);
    }
    super::validate_events(&events)?;
    Ok(events)
}

pub fn load_events_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Event>> {
    read_events_csv(File::open(path)?)
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(input: &str) -> PersistenceResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|e| PersistenceError::InvalidData(format!("invalid date '{input}': {e}")))
}
