//! Server configuration.
//!
//! Settings come from an optional TOML file, then a fixed set of
//! environment variables override individual fields. Everything is read
//! once at startup.

use std::path::{Path, PathBuf};

use realup_map_plot::PlotConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the TOML config file.
pub const CONFIG_ENV: &str = "REALUP_CONFIG";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("{path}: {source}")]
    Io {
        /// Config file path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`ServerConfig`].
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// An environment override could not be parsed.
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Top-level server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// Plot pipeline settings.
    pub plot: PlotConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: PathBuf::from("static"),
            plot: PlotConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Loads the configuration.
    ///
    /// Reads `path` if given, otherwise the file named by `REALUP_CONFIG`
    /// if set, otherwise starts from defaults. Environment overrides are
    /// applied last.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or an
    /// override has an invalid value.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match file {
            Some(file) => {
                log::info!("Loading configuration from {}", file.display());
                Self::from_file(&file)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies overrides looked up by variable name.
    ///
    /// Recognized names: `BIND_ADDR`, `PORT`, `REALUP_DATA_DIR`,
    /// `REALUP_MAP_PATH`, `REALUP_EVENT_LOGGING`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `PORT` or
    /// `REALUP_EVENT_LOGGING` does not parse.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(bind_addr) = lookup("BIND_ADDR") {
            self.bind_addr = bind_addr;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(data_dir) = lookup("REALUP_DATA_DIR") {
            self.plot.data_dir = PathBuf::from(data_dir);
        }
        if let Some(map_path) = lookup("REALUP_MAP_PATH") {
            self.plot.map_path = PathBuf::from(map_path);
        }
        if let Some(flag) = lookup("REALUP_EVENT_LOGGING") {
            self.plot.event_logging = parse_flag(&flag).ok_or(ConfigError::InvalidValue {
                name: "REALUP_EVENT_LOGGING",
                value: flag.clone(),
            })?;
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.plot.map_path, PathBuf::from("templates/map.html"));
        assert_eq!(config.plot.data_dir, PathBuf::from("data"));
        assert_eq!(config.plot.max_listings, 10_000);
        assert_eq!(config.plot.sample_seed, 27);
        assert!(config.plot.event_logging);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            port = 81

            [plot]
            data_dir = "/srv/realup/data"
            event_logging = false
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 81);
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.plot.data_dir, PathBuf::from("/srv/realup/data"));
        assert!(!config.plot.event_logging);
        assert_eq!(config.plot.preview_length, 64);
    }

    #[test]
    fn reads_config_file() {
        let dir = std::env::temp_dir().join("realup_map_server_config_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("realup.toml");
        std::fs::write(&path, "bind_addr = \"0.0.0.0\"\n").unwrap();

        let config = ServerConfig::from_file(&path).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0");

        let missing = ServerConfig::from_file(&dir.join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }

    #[test]
    fn environment_overrides() {
        let mut config = ServerConfig::default();
        config
            .apply_overrides(lookup(&[
                ("BIND_ADDR", "0.0.0.0"),
                ("PORT", "81"),
                ("REALUP_MAP_PATH", "/tmp/map.html"),
                ("REALUP_EVENT_LOGGING", "off"),
            ]))
            .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 81);
        assert_eq!(config.plot.map_path, PathBuf::from("/tmp/map.html"));
        assert_eq!(config.plot.data_dir, PathBuf::from("data"));
        assert!(!config.plot.event_logging);
    }

    #[test]
    fn invalid_overrides_are_errors() {
        let mut config = ServerConfig::default();
        let err = config
            .apply_overrides(lookup(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "PORT", .. }));

        let err = config
            .apply_overrides(lookup(&[("REALUP_EVENT_LOGGING", "maybe")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "REALUP_EVENT_LOGGING",
                ..
            }
        ));
    }
}
