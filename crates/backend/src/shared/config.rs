use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://api.petpooja.com/V1/orders/get_sales_data/";

const ENV_BASE_URL: &str = "PETPOOJA_BASE_URL";
const ENV_APP_KEY: &str = "PETPOOJA_APP_KEY";
const ENV_APP_SECRET: &str = "PETPOOJA_APP_SECRET";
const ENV_ACCESS_TOKEN: &str = "PETPOOJA_ACCESS_TOKEN";
const ENV_REST_ID: &str = "PETPOOJA_REST_ID";
const ENV_FROM_DATE: &str = "PETPOOJA_FROM_DATE";
const ENV_TO_DATE: &str = "PETPOOJA_TO_DATE";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("{0} is not valid unicode")]
    NotUnicode(&'static str),
}

/// Credentials and report window for the PetPooja sales API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetpoojaConfig {
    pub base_url: String,
    pub app_key: String,
    pub app_secret: String,
    pub access_token: String,
    pub rest_id: String,
    pub from_date: String,
    pub to_date: String,
}

impl PetpoojaConfig {
    /// Read the `PETPOOJA_*` variables from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(key)),
        })
    }

    /// Build the config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<Option<String>, ConfigError>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            match lookup(key)? {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(ConfigError::Missing(key)),
            }
        };

        let base_url = lookup(ENV_BASE_URL)?
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            base_url,
            app_key: required(ENV_APP_KEY)?,
            app_secret: required(ENV_APP_SECRET)?,
            access_token: required(ENV_ACCESS_TOKEN)?,
            rest_id: required(ENV_REST_ID)?,
            from_date: required(ENV_FROM_DATE)?,
            to_date: required(ENV_TO_DATE)?,
        })
    }

    fn query_params(&self) -> [(&'static str, &str); 6] {
        [
            ("app_key", self.app_key.as_str()),
            ("app_secret", self.app_secret.as_str()),
            ("access_token", self.access_token.as_str()),
            ("restID", self.rest_id.as_str()),
            ("from_date", self.from_date.as_str()),
            ("to_date", self.to_date.as_str()),
        ]
    }

    /// Full request URL with every query value percent-encoded
    pub fn request_url(&self) -> String {
        self.render_url(|_, value| urlencoding::encode(value).into_owned())
    }

    /// Request URL safe for logs: credentials are masked
    pub fn redacted_url(&self) -> String {
        self.render_url(|name, value| match name {
            "app_key" | "app_secret" | "access_token" => "****".to_string(),
            _ => urlencoding::encode(value).into_owned(),
        })
    }

    fn render_url<F>(&self, encode: F) -> String
    where
        F: Fn(&str, &str) -> String,
    {
        let query = self
            .query_params()
            .iter()
            .map(|(name, value)| format!("{}={}", name, encode(name, value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}/?{}", self.base_url.trim_end_matches('/'), query)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub database: DatabaseConfig,
    pub fetch: FetchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub timeout_secs: u64,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "sales_data.db"

[fetch]
max_retries = 3
initial_delay_ms = 1000
timeout_secs = 30
"#;

/// Load runtime settings from config.toml
///
/// Search order:
/// 1. Next to the executable
/// 2. Falls back to embedded default config
pub fn load_settings() -> anyhow::Result<AppSettings> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let settings: AppSettings = toml::from_str(&contents)?;
                return Ok(settings);
            }
            tracing::debug!("config.toml not found at: {}", config_path.display());
        }
    }

    tracing::info!("Using default embedded configuration");
    let settings: AppSettings = toml::from_str(DEFAULT_CONFIG)?;
    Ok(settings)
}

/// Database file path; relative paths resolve against the working directory
pub fn get_database_path(settings: &AppSettings) -> anyhow::Result<PathBuf> {
    let db_path = Path::new(&settings.database.path);
    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(db_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, String> {
        [
            (ENV_APP_KEY, "key"),
            (ENV_APP_SECRET, "secret"),
            (ENV_ACCESS_TOKEN, "token"),
            (ENV_REST_ID, "r1"),
            (ENV_FROM_DATE, "2024-01-01"),
            (ENV_TO_DATE, "2024-01-31"),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.to_string()))
        .collect()
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<PetpoojaConfig, ConfigError> {
        PetpoojaConfig::from_lookup(|key| Ok(env.get(key).cloned()))
    }

    #[test]
    fn test_default_config_loads() {
        let settings: AppSettings = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(settings.database.path, "sales_data.db");
        assert_eq!(settings.fetch.max_retries, 3);
        assert_eq!(settings.fetch.initial_delay_ms, 1000);
        assert_eq!(settings.fetch.timeout_secs, 30);
    }

    #[test]
    fn test_base_url_defaults() {
        let config = load(&full_env()).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.rest_id, "r1");
    }

    #[test]
    fn test_missing_required_variable() {
        for key in [ENV_APP_KEY, ENV_REST_ID, ENV_TO_DATE] {
            let mut env = full_env();
            env.remove(key);
            assert_eq!(load(&env), Err(ConfigError::Missing(key)));
        }
    }

    #[test]
    fn test_blank_required_variable_is_missing() {
        let mut env = full_env();
        env.insert(ENV_ACCESS_TOKEN, "   ".to_string());
        assert_eq!(load(&env), Err(ConfigError::Missing(ENV_ACCESS_TOKEN)));
        assert_eq!(
            ConfigError::Missing(ENV_ACCESS_TOKEN).to_string(),
            "PETPOOJA_ACCESS_TOKEN not set"
        );
    }

    #[test]
    fn test_request_url_encodes_values() {
        let mut env = full_env();
        env.insert(ENV_BASE_URL, "https://example.test/api///".to_string());
        env.insert(ENV_APP_SECRET, "a b&c=d/é".to_string());
        let config = load(&env).unwrap();

        assert_eq!(
            config.request_url(),
            "https://example.test/api/?app_key=key&app_secret=a%20b%26c%3Dd%2F%C3%A9\
             &access_token=token&restID=r1&from_date=2024-01-01&to_date=2024-01-31"
        );
    }

    #[test]
    fn test_redacted_url_masks_credentials() {
        let config = load(&full_env()).unwrap();
        let url = config.redacted_url();
        assert!(url.starts_with("http://api.petpooja.com/V1/orders/get_sales_data/?"));
        assert!(url.contains("app_key=****&app_secret=****&access_token=****"));
        assert!(url.contains("restID=r1"));
        assert!(!url.contains("secret&"));
    }

    #[test]
    fn test_relative_database_path_uses_working_dir() {
        let settings: AppSettings = toml::from_str(DEFAULT_CONFIG).unwrap();
        let path = get_database_path(&settings).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("sales_data.db"));
    }
}
