// Configuration module
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub cors: CorsSettings,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// "rocksdb" for persistent storage, "memory" for dev/test.
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            data_dir: default_data_dir(),
        }
    }
}

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for signing tokens. Required for startup.
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_jwt_expiry_hours")]
    pub jwt_expiry_hours: i64,
    /// bcrypt cost override; omit to use the library default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bcrypt_cost: Option<u32>,
    /// Admin account seeded on first start when the user store is empty
    /// and `bootstrap_admin_password` is set.
    #[serde(default = "default_admin_username")]
    pub bootstrap_admin_username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap_admin_password: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_expiry_hours: default_jwt_expiry_hours(),
            bcrypt_cost: None,
            bootstrap_admin_username: default_admin_username(),
            bootstrap_admin_password: None,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    /// "compact" text or "json" lines.
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Per-target level overrides, e.g. `actix_web = "debug"`.
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            logs_path: default_logs_path(),
            log_to_console: true,
            format: default_log_format(),
            targets: HashMap::new(),
        }
    }
}

/// CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins; empty or containing "*" allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_true")]
    pub allow_credentials: bool,
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allow_credentials: true,
            max_age: default_cors_max_age(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(2)
}

fn default_storage_backend() -> String {
    "rocksdb".to_string()
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_jwt_expiry_hours() -> i64 {
    24
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_logs_path() -> String {
    "./logs".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_cors_max_age() -> u64 {
    3600
}

fn default_true() -> bool {
    true
}

impl ServerConfig {
    /// Load configuration from a TOML file, apply environment overrides,
    /// and validate the result.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file {}", path.as_ref().display())
        })?;

        let mut config: ServerConfig =
            toml::from_str(&content).context("Failed to parse config file")?;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from file when it exists, otherwise fall back to defaults
    /// plus environment overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            let mut config = ServerConfig::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
    }

    /// Environment variables take precedence over the config file so
    /// secrets can stay out of it.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("ROLODEX_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("ROLODEX_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(secret) = std::env::var("ROLODEX_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(password) = std::env::var("ROLODEX_ADMIN_PASSWORD") {
            self.auth.bootstrap_admin_password = Some(password);
        }
        if let Ok(data_dir) = std::env::var("ROLODEX_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            bail!("auth.jwt_secret must be set (config file or ROLODEX_JWT_SECRET)");
        }
        if !matches!(self.storage.backend.as_str(), "rocksdb" | "memory") {
            bail!(
                "storage.backend must be 'rocksdb' or 'memory', got '{}'",
                self.storage.backend
            );
        }
        if self.auth.jwt_expiry_hours <= 0 {
            bail!("auth.jwt_expiry_hours must be positive");
        }
        Ok(())
    }
}
