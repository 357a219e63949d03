//! Configuration module for the SMB explorer.

use serde::Deserialize;
use std::path::Path;

use crate::{ExplorerError, Result};

/// Web API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number for the Web API.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Bearer token required for share administration (empty = unguarded).
    #[serde(default)]
    pub admin_token: String,
    /// Bearer token required for uploads and folder changes (empty = unguarded).
    #[serde(default)]
    pub manager_token: String,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    5000
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            cors_origins: vec![],
            admin_token: String::new(),
            manager_token: String::new(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/smb-explorer.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Uploaded content configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Directory holding uploaded file bodies.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_storage_path() -> String {
    "data/content".to_string()
}

fn default_max_upload_size() -> u64 {
    50
}

/// Largest accepted `files.max_upload_size_mb` (1 TiB).
pub const MAX_UPLOAD_SIZE_MB: u64 = 1024 * 1024;

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

impl FilesConfig {
    /// Maximum upload size in bytes, saturating on overflow.
    pub fn max_upload_bytes(&self) -> usize {
        let bytes = self.max_upload_size_mb.saturating_mul(1024 * 1024);
        usize::try_from(bytes).unwrap_or(usize::MAX)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/smb-explorer.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Sample data configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Whether the "Test Server" share is created on startup.
    #[serde(default = "default_seed_enabled")]
    pub enabled: bool,
}

fn default_seed_enabled() -> bool {
    true
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_seed_enabled(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Uploaded content configuration.
    #[serde(default)]
    pub files: FilesConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Sample data configuration.
    #[serde(default)]
    pub seed: SeedConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ExplorerError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ExplorerError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `SMB_EXPLORER_ADMIN_TOKEN`: Override the admin token
    /// - `SMB_EXPLORER_MANAGER_TOKEN`: Override the manager token
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("SMB_EXPLORER_ADMIN_TOKEN") {
            if !token.is_empty() {
                self.web.admin_token = token;
            }
        }
        if let Ok(token) = std::env::var("SMB_EXPLORER_MANAGER_TOKEN") {
            if !token.is_empty() {
                self.web.manager_token = token;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.web.port == 0 {
            return Err(ExplorerError::Config("web.port must not be 0".to_string()));
        }
        if self.files.max_upload_size_mb == 0 {
            return Err(ExplorerError::Config(
                "files.max_upload_size_mb must be greater than 0".to_string(),
            ));
        }
        if self.files.max_upload_size_mb > MAX_UPLOAD_SIZE_MB {
            return Err(ExplorerError::Config(format!(
                "files.max_upload_size_mb must be at most {MAX_UPLOAD_SIZE_MB}"
            )));
        }
        if self.database.max_connections == 0 {
            return Err(ExplorerError::Config(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.web.port, 5000);
        assert!(config.web.cors_origins.is_empty());
        assert!(config.web.admin_token.is_empty());
        assert!(config.web.manager_token.is_empty());

        assert_eq!(config.database.path, "data/smb-explorer.db");
        assert_eq!(config.database.max_connections, 5);

        assert_eq!(config.files.storage_path, "data/content");
        assert_eq!(config.files.max_upload_size_mb, 50);
        assert_eq!(config.files.max_upload_bytes(), 50 * 1024 * 1024);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/smb-explorer.log");

        assert!(config.seed.enabled);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[web]
host = "127.0.0.1"
port = 3000
cors_origins = ["http://localhost:5173"]
admin_token = "admin-secret"
manager_token = "manager-secret"

[database]
path = "custom/db.sqlite"
max_connections = 2

[files]
storage_path = "custom/content"
max_upload_size_mb = 5

[logging]
level = "debug"
file = "custom/logs/app.log"

[seed]
enabled = false
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.web.host, "127.0.0.1");
        assert_eq!(config.web.port, 3000);
        assert_eq!(config.web.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.web.admin_token, "admin-secret");
        assert_eq!(config.web.manager_token, "manager-secret");

        assert_eq!(config.database.path, "custom/db.sqlite");
        assert_eq!(config.database.max_connections, 2);

        assert_eq!(config.files.storage_path, "custom/content");
        assert_eq!(config.files.max_upload_size_mb, 5);

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");

        assert!(!config.seed.enabled);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[web]
port = 8081
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.web.port, 8081);
        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.database.path, "data/smb-explorer.db");
        assert!(config.seed.enabled);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.web.port, 5000);
        assert_eq!(config.files.max_upload_size_mb, 50);
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(ExplorerError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(ExplorerError::Io(_))));
    }

    #[test]
    fn test_apply_env_overrides() {
        let original = std::env::var("SMB_EXPLORER_MANAGER_TOKEN").ok();

        std::env::set_var("SMB_EXPLORER_MANAGER_TOKEN", "env-manager");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.web.manager_token, "env-manager");

        std::env::set_var("SMB_EXPLORER_MANAGER_TOKEN", "");
        let mut config = Config::default();
        config.web.manager_token = "from-file".to_string();
        config.apply_env_overrides();
        assert_eq!(config.web.manager_token, "from-file");

        if let Some(val) = original {
            std::env::set_var("SMB_EXPLORER_MANAGER_TOKEN", val);
        } else {
            std::env::remove_var("SMB_EXPLORER_MANAGER_TOKEN");
        }
    }

    #[test]
    fn test_validate_default() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_upload_limit() {
        let mut config = Config::default();
        config.files.max_upload_size_mb = 0;

        let result = config.validate();
        assert!(matches!(result, Err(ExplorerError::Config(msg)) if msg.contains("max_upload_size_mb")));
    }

    #[test]
    fn test_validate_upload_limit_upper_bound() {
        let mut config = Config::default();
        config.files.max_upload_size_mb = MAX_UPLOAD_SIZE_MB + 1;
        assert!(matches!(config.validate(), Err(ExplorerError::Config(_))));

        config.files.max_upload_size_mb = MAX_UPLOAD_SIZE_MB;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_upload_bytes_saturates() {
        let files = FilesConfig {
            max_upload_size_mb: u64::MAX,
            ..FilesConfig::default()
        };
        assert_eq!(files.max_upload_bytes(), usize::MAX);
    }

    #[test]
    fn test_load_with_env_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[web]\nport = 8080\nadmin_token = \"from-file\"\n").unwrap();

        let original = std::env::var("SMB_EXPLORER_ADMIN_TOKEN").ok();
        std::env::set_var("SMB_EXPLORER_ADMIN_TOKEN", "env-admin");
        let config = Config::load_with_env(&path).unwrap();
        if let Some(val) = original {
            std::env::set_var("SMB_EXPLORER_ADMIN_TOKEN", val);
        } else {
            std::env::remove_var("SMB_EXPLORER_ADMIN_TOKEN");
        }

        assert_eq!(config.web.port, 8080);
        assert_eq!(config.web.admin_token, "env-admin");
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = Config::default();
        config.web.port = 0;
        assert!(config.validate().is_err());
    }
}
