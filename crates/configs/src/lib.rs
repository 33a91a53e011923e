//! Application configuration: `config.toml` (optional) overlaid with
//! `LOGMAN_*` / `DATABASE_URL` environment variables.
use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_PORT: u16 = 8016;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://logman.db?mode=rwc";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
    /// Deployment environment; `dev` switches logging to the compact format.
    #[serde(default = "default_env")]
    pub env: String,
}

impl Default for AppSection {
    fn default() -> Self { Self { env: default_env() } }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: DEFAULT_PORT, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_env() -> String { "dev".into() }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` if present (defaults otherwise), apply environment
    /// overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// `lookup` resolves environment variables; tests pass a closure over a map.
    pub fn normalize_and_validate<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup("LOGMAN_ENV").filter(|v| !v.trim().is_empty()) {
            self.app.env = env;
        }
        self.server.apply_env(&lookup)?;
        self.server.normalize()?;
        self.database.apply_env(&lookup);
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, lookup: &F) -> Result<()> {
        if let Some(host) = lookup("LOGMAN_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("LOGMAN_PORT") {
            self.port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("LOGMAN_PORT must be a port number: {e}"))?;
        }
        Ok(())
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    /// `DATABASE_URL` wins over the file; an empty URL falls back to the
    /// local SQLite file.
    fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, lookup: &F) {
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            self.url = url;
        }
        if self.url.trim().is_empty() {
            self.url = DEFAULT_DATABASE_URL.to_string();
        }
    }

    pub fn with_url(url: &str) -> Self {
        Self { url: url.to_string(), ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("sqlite:") || lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with sqlite:, postgres:// or postgresql://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate(env(&[])).unwrap();
        assert_eq!(cfg.app.env, "dev");
        assert_eq!(cfg.server.port, DEFAULT_PORT);
        assert_eq!(cfg.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = parse(r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [database]
            url = "sqlite::memory:"
        "#).unwrap();
        cfg.normalize_and_validate(env(&[
            ("LOGMAN_ENV", "prod"),
            ("LOGMAN_PORT", "8100"),
            ("DATABASE_URL", "postgres://u:p@localhost/logman"),
        ])).unwrap();
        assert_eq!(cfg.app.env, "prod");
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:8100");
        assert_eq!(cfg.database.url, "postgres://u:p@localhost/logman");
    }

    #[test]
    fn rejects_unparseable_port() {
        let mut cfg = AppConfig::default();
        assert!(cfg.normalize_and_validate(env(&[("LOGMAN_PORT", "eighty")])).is_err());
    }

    #[test]
    fn rejects_unknown_database_scheme() {
        let mut cfg = AppConfig::default();
        assert!(cfg.normalize_and_validate(env(&[("DATABASE_URL", "mysql://localhost/x")])).is_err());
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let mut db = DatabaseConfig::with_url("sqlite::memory:");
        db.min_connections = 5;
        db.max_connections = 2;
        assert!(db.validate().is_err());
    }
}
