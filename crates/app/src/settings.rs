//! Settings for the server binary. The database part is shared with the
//! migration CLI, see [`migration::settings`].
use config::ConfigError;
use migration::DatabaseSettings;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip)]
    pub database: DatabaseSettings,
    pub api_key: String,
    pub port: u16,
    pub bind: String,
    pub allowed_origins: Vec<String>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseSettings::default(),
            api_key: "test-api-key".to_string(),
            port: 8080,
            bind: "0.0.0.0".to_string(),
            allowed_origins: vec!["*".to_string()],
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = migration::settings::load()?;
        let database = config.clone().try_deserialize()?;
        let settings: Settings = config.try_deserialize()?;

        Ok(Self {
            database,
            ..settings
        })
    }
}
