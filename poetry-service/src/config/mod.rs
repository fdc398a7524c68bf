use secrecy::SecretString;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct PoetryConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub content: ContentConfig,
    pub gemini: GeminiSettings,
    pub security: SecurityConfig,
    pub frontend: FrontendConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(format!(
                "ENVIRONMENT must be 'dev' or 'prod', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Location of the poetry book text loaded at startup.
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// `None` when no key is configured; chat requests then fail per request.
    pub api_key: Option<SecretString>,
    pub model: String,
    pub api_base: String,
    /// `None` disables the request timeout.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub build_dir: PathBuf,
}

impl PoetryConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let environment: Environment = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "dev".to_string())
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;
        let is_prod = environment == Environment::Prod;

        let timeout_secs: u64 = get_env(
            "GEMINI_TIMEOUT_SECS",
            Some(&DEFAULT_TIMEOUT_SECS.to_string()),
            false,
        )?
        .parse()
        .map_err(|e: std::num::ParseIntError| {
            AppError::ConfigError(anyhow::anyhow!("GEMINI_TIMEOUT_SECS: {}", e))
        })?;

        Ok(PoetryConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("poetry-service"), false)?,
            log_level: get_env("LOG_LEVEL", Some("info"), false)?,
            otlp_endpoint: optional_env("OTLP_ENDPOINT"),
            content: ContentConfig {
                path: get_env("POETRY_BOOK_PATH", Some("data/poetry_book.txt"), is_prod)?.into(),
            },
            gemini: GeminiSettings {
                api_key: optional_env("GEMINI_API_KEY").map(SecretString::new),
                model: get_env("GEMINI_MODEL", Some("gemini-2.0-flash"), false)?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), false)?,
                timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            },
            security: SecurityConfig {
                allowed_origins: parse_origins(&get_env(
                    "ALLOWED_ORIGINS",
                    Some("http://localhost:3000"),
                    is_prod,
                )?),
            },
            frontend: FrontendConfig {
                build_dir: get_env("FRONTEND_BUILD_DIR", Some("../frontend/build"), is_prod)?
                    .into(),
            },
        })
    }

    pub fn serves_frontend(&self) -> bool {
        self.environment == Environment::Prod
    }
}

/// Splits a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blanks_dropped() {
        assert_eq!(
            parse_origins(" https://a.example, ,https://b.example ,"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn environment_parses_known_values() {
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Prod));
        assert_eq!("Production".parse::<Environment>(), Ok(Environment::Prod));
        assert_eq!("dev".parse::<Environment>(), Ok(Environment::Dev));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn missing_key_without_default_is_config_error() {
        let result = get_env("POETRY_SERVICE_TEST_SURELY_UNSET", None, false);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn missing_key_with_default_uses_default_outside_prod() {
        let value = get_env("POETRY_SERVICE_TEST_SURELY_UNSET", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn prod_ignores_defaults_for_strict_keys() {
        let result = get_env("POETRY_SERVICE_TEST_SURELY_UNSET", Some("fallback"), true);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
