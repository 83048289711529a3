use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::Cli;

/// Output rendering for the selected years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Settings read from an optional TOML file. Command-line flags win.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// SQLite database holding evaluated years.
    #[serde(default = "default_database")]
    pub database: PathBuf,

    #[serde(default)]
    pub format: OutputFormat,

    /// JSON catalogue replacing the built-in one.
    #[serde(default)]
    pub catalogue: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            format: OutputFormat::default(),
            catalogue: None,
        }
    }
}

fn default_database() -> PathBuf {
    PathBuf::from("meb_calendar.sqlite")
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Config file (if any) overlaid with explicit command-line flags.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(db) = &cli.db {
            config.database = db.clone();
        }
        if let Some(format) = cli.format {
            config.format = format;
        }
        if let Some(catalogue) = &cli.catalogue {
            config.catalogue = Some(catalogue.clone());
        }
        Ok(config)
    }
}
