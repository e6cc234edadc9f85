use chrono::NaiveDate;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

const CONFIG_PATH_ENV_VAR: &str = "CALGRID_CONFIG_FILE";

pub fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("calgrid").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".calgrid.toml"));
    }

    locations
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Date used to pick the selected week instead of the system clock.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    /// Log specification, e.g. `"debug"` or `"calgrid=trace"`.
    #[serde(default)]
    pub log_level: Option<String>,
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        content.parse().map_err(|err: Error| {
            let msg = format!("{}: {}", path.display(), err.message.unwrap_or_default());
            Error::new(err.kind, &msg)
        })
    }
}

/// Loads the configuration from `path` if given, otherwise from the first existing default
/// location. Falls back to the default configuration when no file exists.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    for location in find_configfile_locations() {
        if location.is_file() {
            log::info!("loading config from '{}'", location.display());
            return Config::from_file(&location);
        }
    }

    log::debug!("no config file found, using defaults");
    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("calgrid-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(Config::from_str("").unwrap(), Config::default());
    }

    #[test]
    fn parse_all_keys() {
        let config = Config::from_str(
            r#"
            today = "2024-03-18"
            log_level = "trace"
            "#,
        )
        .unwrap();

        assert_eq!(config.today, NaiveDate::from_ymd_opt(2024, 3, 18));
        assert_eq!(config.log_level.as_deref(), Some("trace"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_str("week_start = \"sunday\"").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn invalid_dates_are_rejected() {
        let err = Config::from_str("today = \"2023-02-30\"").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn load_explicit_path() {
        let path = temp_config("explicit.toml", "today = \"2027-01-01\"\n");
        let config = load_suitable_config(Some(path.as_path())).unwrap();
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2027, 1, 1));
    }

    #[test]
    fn explicit_path_errors_name_the_file() {
        let path = temp_config("broken.toml", "today = 12\n");
        let err = load_suitable_config(Some(path.as_path())).unwrap_err();

        assert!(matches!(err.kind, ErrorKind::ConfigParse));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn missing_explicit_path_is_an_io_error() {
        let path = env::temp_dir().join("calgrid-does-not-exist.toml");
        let err = load_suitable_config(Some(path.as_path())).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }
}
