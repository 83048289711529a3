use std::ops::RangeInclusive;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use crate::config::OutputFormat;

/// Official holidays, school breaks and commemorative days for a year.
#[derive(Parser)]
#[command(
    name = "meb-calendar",
    version,
    about = "Compute and store the national school/work calendar for a year"
)]
pub struct Cli {
    /// Gregorian year to show.
    #[arg(allow_negative_numbers = true)]
    pub year: i32,

    /// Last year of an inclusive range starting at YEAR.
    #[arg(allow_negative_numbers = true)]
    pub end_year: Option<i32>,

    /// SQLite database file (default: meb_calendar.sqlite).
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON catalogue replacing the built-in rules.
    #[arg(long)]
    pub catalogue: Option<PathBuf>,

    /// Output format on stdout.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Also write the events to a .json or .csv file.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Recompute even if the year is already stored, replacing stored rows.
    #[arg(long)]
    pub recompute: bool,

    /// Evaluate without reading or writing the database.
    #[arg(long, conflicts_with = "recompute")]
    pub no_store: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn years(&self) -> Result<RangeInclusive<i32>> {
        let end = self.end_year.unwrap_or(self.year);
        if end < self.year {
            bail!("end year {end} precedes start year {}", self.year);
        }
        Ok(self.year..=end)
    }
}
