//! Database connection settings, shared by the server binary and the
//! migration CLI so both always target the same database.
//!
//! Read from an optional `settings.toml` in the working directory, then from
//! environment variables. Keys are flat: `DB_HOST` and `db_host = "..."`
//! configure the same value.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Sources every binary reads its settings from.
pub fn load() -> Result<Config, ConfigError> {
    Config::builder()
        .add_source(File::with_name("settings").required(false))
        .add_source(
            Environment::default()
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("allowed_origins"),
        )
        .build()
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_ssl_mode: String,
    /// Full connection string. Overrides the `db_*` values when set.
    pub database_url: Option<String>,
    /// When false the server starts straight away on fixture data.
    pub db_enabled: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            db_host: "localhost".to_string(),
            db_port: 5432,
            db_user: "postgres".to_string(),
            db_password: "postgres".to_string(),
            db_name: "postgres".to_string(),
            db_ssl_mode: "disable".to_string(),
            database_url: None,
            db_enabled: true,
        }
    }
}

impl DatabaseSettings {
    pub fn new() -> Result<Self, ConfigError> {
        load()?.try_deserialize()
    }

    pub fn url(&self) -> String {
        match self.database_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!(
                "postgres://{}:{}@{}:{}/{}?sslmode={}",
                self.db_user,
                self.db_password,
                self.db_host,
                self.db_port,
                self.db_name,
                self.db_ssl_mode
            ),
        }
    }
}
