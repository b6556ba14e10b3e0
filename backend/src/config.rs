//! Server configuration, read from `DASHBOARD_*` environment variables.
//!
//! | variable                     | default              |
//! |------------------------------|----------------------|
//! | `DASHBOARD_HOST`             | `127.0.0.1`          |
//! | `DASHBOARD_PORT`             | `5000`               |
//! | `DASHBOARD_DB_PATH`          | `dashboard.sqlite`   |
//! | `DASHBOARD_MAX_UPLOAD_BYTES` | `10485760` (10 MB)   |
//! | `DASHBOARD_API_TOKENS`       | empty (any bearer)   |
//! | `DASHBOARD_OPEN_BROWSER`     | `false`              |

use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub max_upload_bytes: usize,
    /// Accepted bearer tokens. When empty, any non-empty token is accepted.
    #[serde(skip_serializing)]
    pub api_tokens: Vec<String>,
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            db_path: PathBuf::from("dashboard.sqlite"),
            max_upload_bytes: 10 * 1024 * 1024,
            api_tokens: Vec::new(),
            open_browser: false,
        }
    }
}

fn lookup<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(&std::env::vars().collect())
    }

    fn from_vars(vars: &HashMap<String, String>) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(host) = lookup(vars, "DASHBOARD_HOST") {
            config.host = host.to_string();
        }
        if let Some(port) = lookup(vars, "DASHBOARD_PORT") {
            config.port = port
                .parse()
                .map_err(|e| format!("DASHBOARD_PORT '{}': {}", port, e))?;
        }
        if let Some(path) = lookup(vars, "DASHBOARD_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }
        if let Some(limit) = lookup(vars, "DASHBOARD_MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = limit
                .parse()
                .map_err(|e| format!("DASHBOARD_MAX_UPLOAD_BYTES '{}': {}", limit, e))?;
        }
        if let Some(tokens) = lookup(vars, "DASHBOARD_API_TOKENS") {
            config.api_tokens = tokens
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(flag) = lookup(vars, "DASHBOARD_OPEN_BROWSER") {
            config.open_browser = matches!(flag.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        Ok(config)
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn accepts_token(&self, token: &str) -> bool {
        self.api_tokens.is_empty() || self.api_tokens.iter().any(|t| t == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_without_variables() {
        let config = ServerConfig::from_vars(&HashMap::new()).unwrap();
        assert_eq!(config.url(), "http://127.0.0.1:5000");
        assert!(config.accepts_token("anything"));
        assert!(!config.open_browser);
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_vars(&vars(&[
            ("DASHBOARD_PORT", "8080"),
            ("DASHBOARD_API_TOKENS", "a, b,,"),
            ("DASHBOARD_OPEN_BROWSER", "TRUE"),
            ("DASHBOARD_MAX_UPLOAD_BYTES", "1024"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_tokens, vec!["a", "b"]);
        assert!(config.accepts_token("b"));
        assert!(!config.accepts_token("c"));
        assert!(config.open_browser);
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = ServerConfig::from_vars(&vars(&[("DASHBOARD_PORT", "http")])).unwrap_err();
        assert!(err.starts_with("DASHBOARD_PORT 'http'"));
    }

    #[test]
    fn logged_configuration_omits_tokens() {
        let mut config = ServerConfig::default();
        config.api_tokens = vec!["secret".to_string()];
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
