use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::AppError;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub api_base_url: String,
    pub seed_path: Option<PathBuf>,
    pub fetch_timeout: Duration,
    pub strict_image_url: bool,
    pub mock_latency: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_base_url: DEFAULT_API_URL.to_string(),
            seed_path: None,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            strict_image_url: false,
            mock_latency: Duration::ZERO,
        }
    }
}

impl Config {
    /// Reads configuration from the process environment. Call `dotenv().ok()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let fetch_timeout_secs: u64 = parse_var(&non_empty, "FETCH_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);
        if fetch_timeout_secs == 0 {
            return Err(AppError::Config("FETCH_TIMEOUT_SECS must be greater than zero".to_string()));
        }

        Ok(Config {
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
            api_base_url: non_empty("DIRECTORY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            seed_path: non_empty("EMPLOYEE_SEED_PATH").map(PathBuf::from),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            strict_image_url: parse_flag(&non_empty, "STRICT_IMAGE_URL")?.unwrap_or(false),
            mock_latency: Duration::from_millis(parse_var(&non_empty, "MOCK_LATENCY_MS")?.unwrap_or(0)),
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(None),
    }
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<Option<bool>, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|raw| raw.trim().to_ascii_lowercase()) {
        Some(raw) => match raw.as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(AppError::Config(format!("{} must be a boolean, got {}", key, raw))),
        },
        None => Ok(None),
    }
}
