use super::{EventStore, PersistenceError, PersistenceResult};
use crate::{Category, Event};
use chrono::NaiveDate;
use parking_lot::Mutex;
use rusqlite::{Connection, params};
use std::str::FromStr;
use tracing::{debug, info};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SqliteEventStore {
    connection: Mutex<Connection>,
}

impl SqliteEventStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::from_connection(connection)
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> PersistenceResult<Self> {
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                year INTEGER NOT NULL,
                category TEXT NOT NULL,
                name TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS events_year ON events (year);
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn row_to_event(
        year: i32,
        category: String,
        name: String,
        start_date: String,
        end_date: String,
    ) -> PersistenceResult<Event> {
        let category = Category::from_str(&category)
            .map_err(|e| PersistenceError::InvalidData(e.to_string()))?;
        Ok(Event {
            name,
            category,
            start_date: parse_date(&start_date)?,
            end_date: parse_date(&end_date)?,
            year,
        })
    }
}

impl EventStore for SqliteEventStore {
    fn save_events(&self, year: i32, events: &[Event]) -> PersistenceResult<()> {
        super::validate_year(year, events)?;
        let mut conn = self.connection.lock();
        let tx = conn.transaction()?;
        let replaced = tx.execute("DELETE FROM events WHERE year = ?1", params![year])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO events (year, category, name, start_date, end_date) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for event in events {
                stmt.execute(params![
                    event.year,
                    event.category.as_str(),
                    event.name,
                    event.start_date.format(DATE_FORMAT).to_string(),
                    event.end_date.format(DATE_FORMAT).to_string(),
                ])?;
            }
        }
        tx.commit()?;
        if replaced > 0 {
            debug!(year, replaced, "replaced previously stored events");
        }
        info!(year, count = events.len(), "stored events");
        Ok(())
    }

    fn load_events(&self, year: i32) -> PersistenceResult<Vec<Event>> {
        let conn = self.connection.lock();
        let mut stmt = conn.prepare(
            "SELECT year, category, name, start_date, end_date FROM events WHERE year = ?1 ORDER BY start_date ASC, id ASC",
        )?;
        let rows = stmt.query_map(params![year], |row| {
            Ok((
                row.get::<_, i32>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (year, category, name, start_date, end_date) = row?;
            events.push(Self::row_to_event(year, category, name, start_date, end_date)?);
        }

        super::validate_year(year, &events)?;
        Ok(events)
    }

    fn year_exists(&self, year: i32) -> PersistenceResult<bool> {
        let conn = self.connection.lock();
        let count: i64 = conn.query_row(
            "SELECT COUNT(id) FROM events WHERE year = ?1",
            params![year],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn stored_years(&self) -> PersistenceResult<Vec<i32>> {
        let conn = self.connection.lock();
        let mut stmt = conn.prepare("SELECT DISTINCT year FROM events ORDER BY year ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, i32>(0))?;
        let mut years = Vec::new();
        for year in rows {
            years.push(year?);
        }
        Ok(years)
    }

    fn delete_year(&self, year: i32) -> PersistenceResult<usize> {
        let conn = self.connection.lock();
        let removed = conn.execute("DELETE FROM events WHERE year = ?1", params![year])?;
        Ok(removed)
    }
}

fn parse_date(input: &str) -> PersistenceResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|e| PersistenceError::InvalidData(format!("invalid date '{input}': {e}")))
}
