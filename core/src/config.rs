use camino::Utf8Path as Path;
use color_eyre::eyre::{bail, Context, Result};
use serde::Deserialize;

use crate::model::{is_valid_date_format, DEFAULT_FOLDER_DATE_FORMAT};

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlCatalog {
    owner: String,
    folder_date_format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlLog {
    filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlConfig {
    #[serde(rename = "Catalog")]
    pub catalog: TomlCatalog,
    #[serde(rename = "Log")]
    pub log: Option<TomlLog>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub owner: String,
    /// strftime format of the start date prefixing generated folder names
    pub folder_date_format: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directives
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub log: LogConfig,
}

pub fn read_config(path: &Path) -> Result<Config> {
    let toml_str = std::fs::read_to_string(path)
        .context(format!("Error reading config file {}", path))?;
    parse_config(&toml_str).context(format!("Error in config file {}", path))
}

pub fn parse_config(toml_str: &str) -> Result<Config> {
    let toml_config: TomlConfig = toml::from_str(toml_str).context("Error parsing config file")?;
    let owner = toml_config.catalog.owner.trim().to_owned();
    if owner.is_empty() {
        bail!("Catalog.owner must not be blank");
    }
    let folder_date_format = toml_config
        .catalog
        .folder_date_format
        .unwrap_or_else(|| DEFAULT_FOLDER_DATE_FORMAT.to_owned());
    if !is_valid_date_format(&folder_date_format) {
        bail!(
            "Catalog.folder_date_format is not a valid date format: {}",
            folder_date_format
        );
    }
    let log = toml_config
        .log
        .and_then(|log| log.filter)
        .map(|filter| LogConfig { filter })
        .unwrap_or_default();
    Ok(Config {
        catalog: CatalogConfig {
            owner,
            folder_date_format,
        },
        log,
    })
}
