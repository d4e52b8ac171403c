use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr, time::Duration};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

/// Which document store backs the `projects` collection.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// How lookup misses on get and edit are reported.
///
/// - `Strict` → 404 on get, 404 on edit
/// - `Legacy` → 500 on get, 200 with an empty record on edit
///
/// Delete misses are 404 and malformed ids are 400 under either policy.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotFoundPolicy {
    #[default]
    Strict,
    Legacy,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_store")]
    pub store: StoreBackend,

    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub not_found_policy: NotFoundPolicy,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Project-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_store() -> StoreBackend {
    StoreBackend::Postgres
}
fn default_max_connections() -> u32 {
    20
}
fn default_request_timeout() -> String {
    "10s".to_string()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .try_parsing(true)
                    .ignore_empty(true)
            );

        Self::from_builder(builder, env_name)
    }

    pub fn from_builder(
        builder: ConfigBuilder<DefaultState>,
        env_name: AppEnvironment,
    ) -> Result<Self, ConfigError> {
        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.store == StoreBackend::Postgres && self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty when store is postgres".to_string());
        }
        match humantime::parse_duration(&self.request_timeout) {
            Ok(d) if d.is_zero() => errors.push("REQUEST_TIMEOUT must be greater than zero".to_string()),
            Ok(_) => {}
            Err(e) => errors.push(format!("REQUEST_TIMEOUT is invalid: {}", e)),
        }
        if self.worker_count == 0 {
            errors.push("WORKER_COUNT must be at least 1".to_string());
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    /// Per-operation bound for store calls.
    pub fn store_timeout(&self) -> Duration {
        humantime::parse_duration(&self.request_timeout).unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("store", &self.store)
            .field("database_url", &self.database_url.redact())
            .field("database_max_connections", &self.database_max_connections)
            .field("request_timeout", &self.request_timeout)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("not_found_policy", &self.not_found_policy)
            .finish()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use config::FileFormat;

    pub fn test_config() -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "Project API Test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            worker_count: 1,
            store: StoreBackend::Memory,
            database_url: String::new(),
            database_max_connections: 5,
            request_timeout: "10s".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
            not_found_policy: NotFoundPolicy::Strict,
        }
    }

    fn load(toml: &str, env_name: AppEnvironment) -> Result<AppConfig, ConfigError> {
        let builder = Config::builder().add_source(File::from_str(toml, FileFormat::Toml));
        AppConfig::from_builder(builder, env_name)
    }

    #[test]
    fn defaults_apply_for_memory_store() {
        let config = load(r#"store = "memory""#, AppEnvironment::Development).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.store_timeout(), Duration::from_secs(10));
        assert_eq!(config.not_found_policy, NotFoundPolicy::Strict);
        assert_eq!(config.cors_origins(), vec!["*".to_string()]);
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = load(r#"store = "postgres""#, AppEnvironment::Development).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn invalid_timeout_and_production_wildcard_are_reported_together() {
        let err = load(
            r#"
            store = "memory"
            request_timeout = "soon"
            "#,
            AppEnvironment::Production,
        )
        .unwrap_err()
        .to_string();

        assert!(err.contains("REQUEST_TIMEOUT"));
        assert!(err.contains("Wildcard CORS"));
    }

    #[test]
    fn parses_policy_and_humantime_timeout() {
        let config = load(
            r#"
            store = "memory"
            request_timeout = "250ms"
            not_found_policy = "legacy"
            cors_allowed_origins = ["https://a.dev, https://b.dev"]
            "#,
            AppEnvironment::Testing,
        )
        .unwrap();

        assert_eq!(config.store_timeout(), Duration::from_millis(250));
        assert_eq!(config.not_found_policy, NotFoundPolicy::Legacy);
        assert_eq!(config.cors_origins(), vec!["https://a.dev", "https://b.dev"]);
        assert_eq!(config.env, AppEnvironment::Testing);
    }

    #[test]
    fn debug_redacts_database_url() {
        let mut config = test_config();
        config.database_url = "postgres://user:secret@db/projects".into();

        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret"));
        assert!(printed.contains("[REDACTED]"));
    }
}
