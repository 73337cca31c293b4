use serde::Deserialize;

use crate::sqlite;

/// Layered application settings: `config/default.toml`, overridden by
/// `BOOK_OUTLET__`-prefixed environment variables (`BOOK_OUTLET__SERVER__PORT`
/// and friends). Both layers are optional; defaults cover everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub sqlite: sqlite::Settings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        3000
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix("BOOK_OUTLET").separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_stand_alone() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.sqlite.url, "sqlite://db/book_outlet.db");
        assert_eq!(settings.sqlite.max_connections, 5);
    }
}
