//! Handles settings for the application.
//!
//! Values come from an optional `settings.toml` (the path can be changed with
//! `TALLY_SETTINGS`) and are overridden by `TALLY__<SECTION>__<KEY>`
//! environment variables, e.g. `TALLY__SERVER__PORT=8080`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_SETTINGS_PATH: &str = "settings";

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
            database: Database::Sqlite("tally.db".to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let path =
            std::env::var("TALLY_SETTINGS").unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());

        Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("TALLY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_file_uses_defaults() {
        let settings = parse("");
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.address(), "127.0.0.1:3000");
        assert_eq!(
            settings.server.database,
            Database::Sqlite("tally.db".to_string())
        );
    }

    #[test]
    fn memory_database() {
        let settings = parse(
            r#"
            [server]
            database = "memory"
            "#,
        );
        assert_eq!(settings.server.database, Database::Memory);
    }

    #[test]
    fn sqlite_path_and_partial_overrides() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [server]
            port = 8080
            database = { sqlite = "/var/lib/tally/tally.db" }
            "#,
        );
        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.address(), "127.0.0.1:8080");
        assert_eq!(
            settings.server.database,
            Database::Sqlite("/var/lib/tally/tally.db".to_string())
        );
    }
}
