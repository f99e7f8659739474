//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Port the vim plugin connects to.
pub const DEFAULT_PORT: u16 = 33039;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    /// Listener and connection settings
    pub server: ServerConfig,
    /// Highlighting settings
    pub highlight: HighlightConfig,
}

/// Listener and per-connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub host: String,
    /// TCP port to listen on
    pub port: u16,
    /// Largest message, in bytes, before the connection is closed
    pub max_message_bytes: usize,
    /// Close connections that send nothing for this many seconds (unset = never)
    pub idle_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            max_message_bytes: 16 * 1024 * 1024,
            idle_timeout_secs: None,
        }
    }
}

/// Highlighting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Grammar used for every request (e.g., "javascript", "json")
    pub language: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            language: "javascript".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 4000
max_message_bytes = 1024
idle_timeout_secs = 30

[highlight]
language = "json"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.max_message_bytes, 1024);
        assert_eq!(config.server.idle_timeout_secs, Some(30));
        assert_eq!(config.highlight.language, "json");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.server.idle_timeout_secs, None);
        assert_eq!(config.highlight.language, "javascript");
    }

    #[test]
    fn test_wrong_field_type_rejected() {
        let result: Result<Config, _> = toml::from_str("[server]\nport = \"eighty\"\n");
        assert!(result.is_err());
    }
}
