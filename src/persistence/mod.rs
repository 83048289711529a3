use crate::Event;
use crate::error::CalendarError;
use std::collections::HashSet;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid catalogue: {0}")]
    Catalogue(#[from] CalendarError),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Storage for evaluated years.
pub trait EventStore {
    /// Replace whatever is stored for `year` with `events`.
    fn save_events(&self, year: i32, events: &[Event]) -> PersistenceResult<()>;
    /// Stored events for `year`, ordered by start date.
    fn load_events(&self, year: i32) -> PersistenceResult<Vec<Event>>;
    fn year_exists(&self, year: i32) -> PersistenceResult<bool>;
    fn stored_years(&self) -> PersistenceResult<Vec<i32>>;
    /// Returns the number of removed events.
    fn delete_year(&self, year: i32) -> PersistenceResult<usize>;
}

/// Checks the invariants every stored year must hold: ranges are not
/// inverted and `(name, start_date)` is unique.
pub fn validate_events(events: &[Event]) -> PersistenceResult<()> {
    let mut seen = HashSet::with_capacity(events.len());
    for event in events {
        if event.start_date > event.end_date {
            return Err(PersistenceError::InvalidData(format!(
                "event '{}' starts {} after it ends {}",
                event.name, event.start_date, event.end_date
            )));
        }
        if !seen.insert((event.name.as_str(), event.start_date)) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate event '{}' on {}",
                event.name, event.start_date
            )));
        }
    }
    Ok(())
}

/// Like [`validate_events`], additionally requiring every event to be tagged with `year`.
pub fn validate_year(year: i32, events: &[Event]) -> PersistenceResult<()> {
    if let Some(stray) = events.iter().find(|e| e.year != year) {
        return Err(PersistenceError::InvalidData(format!(
            "event '{}' belongs to {} not {}",
            stray.name, stray.year, year
        )));
    }
    validate_events(events)
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{
    load_catalogue_from_json, load_events_from_csv, load_events_from_json, save_events_to_csv,
    save_events_to_json, write_events_csv, write_events_json,
};
