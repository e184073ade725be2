use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, SwitchError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub switches: SwitchConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
    pub collection: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            name: "chck".to_string(),
            collection: "switches".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    /// Upper bound for `count` on bulk creation.
    pub max_batch: usize,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self { max_batch: 100 }
    }
}

impl ServerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| SwitchError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SwitchError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Apply overrides from process environment variables.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any variable source. Later keys win:
    /// `SERVER_PORT` over `PORT`, `DATABASE_URL` over `MONGODB_URI`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.http.host = host;
        }

        for key in ["PORT", "SERVER_PORT"] {
            if let Some(port) = lookup(key).filter(|v| !v.is_empty()) {
                self.http.port = port
                    .parse()
                    .map_err(|_| SwitchError::Config(format!("{} is not a port: {}", key, port)))?;
            }
        }

        for key in ["MONGODB_URI", "DATABASE_URL"] {
            if let Some(uri) = lookup(key).filter(|v| !v.is_empty()) {
                self.database.uri = uri;
            }
        }

        if let Some(name) = lookup("DATABASE_NAME").filter(|v| !v.is_empty()) {
            self.database.name = name;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[http]
host = "127.0.0.1"
port = 9000

[database]
uri = "mongodb://db:27017"
name = "switchboard"
collection = "flags"

[switches]
max_batch = 10
        "#;

        let config = ServerConfig::from_toml(toml_content).unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.database.uri, "mongodb://db:27017");
        assert_eq!(config.database.name, "switchboard");
        assert_eq!(config.database.collection, "flags");
        assert_eq!(config.switches.max_batch, 10);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = ServerConfig::from_toml("[http]\nport = 1234\n").unwrap();
        assert_eq!(config.http.port, 1234);
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.database.collection, "switches");
        assert_eq!(config.switches.max_batch, 100);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PORT", "7000"),
            ("DATABASE_URL", "mongodb://other:27017"),
            ("DATABASE_NAME", "prod"),
        ]
        .into_iter()
        .collect();

        let mut config = ServerConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.http.port, 7000);
        assert_eq!(config.database.uri, "mongodb://other:27017");
        assert_eq!(config.database.name, "prod");
        assert_eq!(config.http.host, "0.0.0.0");
    }

    #[test]
    fn test_bad_port_rejected() {
        let mut config = ServerConfig::default();
        let result = config.apply_overrides(|key| (key == "PORT").then(|| "http".to_string()));
        assert!(result.is_err());
    }
}
