/*
 * Responsibility
 * - 環境変数の読み込み (DATABASE_URL, CORS, identity provider, timeouts)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// How bearer tokens are verified.
#[derive(Debug, Clone)]
pub enum IdentityProviderConfig {
    /// Local signature check against a configured key.
    Jwt {
        issuer: String,
        audience: String,
        algorithm: Algorithm,
        /// PEM for asymmetric algorithms, raw secret for HS256.
        key_material: String,
        leeway_seconds: u64,
    },
    /// Remote RFC 7662 token introspection.
    Introspection {
        endpoint: Url,
        client_id: Option<String>,
        client_secret: Option<String>,
    },
}

pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub identity_provider: IdentityProviderConfig,

    pub upstream_timeout: Duration,
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub(crate) fn parse_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "RS256" => Ok(Algorithm::RS256),
        "ES256" => Ok(Algorithm::ES256),
        "EDDSA" => Ok(Algorithm::EdDSA),
        "HS256" => Ok(Algorithm::HS256),
        _ => Err(ConfigError::Invalid("ACCESS_JWT_ALGORITHM")),
    }
}

pub(crate) fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl IdentityProviderConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let kind = std::env::var("IDENTITY_PROVIDER").unwrap_or_else(|_| "jwt".to_string());

        match kind.to_ascii_lowercase().as_str() {
            "jwt" => {
                let algorithm = parse_algorithm(
                    &std::env::var("ACCESS_JWT_ALGORITHM").unwrap_or_else(|_| "RS256".into()),
                )?;

                let key_material = if algorithm == Algorithm::HS256 {
                    required("ACCESS_JWT_SECRET")?
                } else {
                    required("ACCESS_JWT_PUBLIC_KEY_PEM")?.replace("\\n", "\n")
                };

                Ok(Self::Jwt {
                    issuer: required("AUTH_ISSUER")?,
                    audience: required("AUTH_AUDIENCE")?,
                    algorithm,
                    key_material,
                    leeway_seconds: env_or("ACCESS_TOKEN_LEEWAY_SECONDS", 60),
                })
            }
            "introspection" => {
                let endpoint = Url::parse(&required("INTROSPECTION_URL")?)
                    .map_err(|_| ConfigError::Invalid("INTROSPECTION_URL"))?;

                if !matches!(endpoint.scheme(), "http" | "https") {
                    return Err(ConfigError::Invalid("INTROSPECTION_URL"));
                }

                Ok(Self::Introspection {
                    endpoint,
                    client_id: optional("INTROSPECTION_CLIENT_ID"),
                    client_secret: optional("INTROSPECTION_CLIENT_SECRET"),
                })
            }
            _ => Err(ConfigError::Invalid("IDENTITY_PROVIDER")),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = env_or("PORT", 8080);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url = required("DATABASE_URL")?;
        let database_max_connections = env_or("DATABASE_MAX_CONNECTIONS", 10);

        let app_env = AppEnv::from_env();

        let cors_allowed_origins =
            parse_origins(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let identity_provider = IdentityProviderConfig::from_env()?;

        let upstream_timeout = Duration::from_millis(env_or("UPSTREAM_TIMEOUT_MS", 3_000));
        let request_timeout = Duration::from_secs(env_or("REQUEST_TIMEOUT_SECONDS", 30));
        let body_limit_bytes = env_or("BODY_LIMIT_BYTES", 1024 * 1024);

        if upstream_timeout.is_zero() {
            return Err(ConfigError::Invalid("UPSTREAM_TIMEOUT_MS"));
        }
        if request_timeout <= upstream_timeout {
            // a request must outlive its own upstream calls
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"));
        }

        Ok(Self {
            addr,
            database_url,
            database_max_connections,
            app_env,
            cors_allowed_origins,
            identity_provider,
            upstream_timeout,
            request_timeout,
            body_limit_bytes,
        })
    }
}
