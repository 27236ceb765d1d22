//! Configuration module
//!
//! Environment-driven configuration for the broker and front services. Both
//! services share a `BaseConfig`; service-specific settings live in
//! `BrokerConfig` and `FrontConfig`.

use std::env;

// Common constants
const BROKER_PORT: u16 = 8081;
const FRONT_PORT: u16 = 8080;
const PRESIGN_EXPIRY_SECS: u64 = 15 * 60;
const JWT_EXPIRY_HOURS: i64 = 24;
const BROKER_TIMEOUT_SECS: u64 = 10;
const MAX_BODY_BYTES: usize = 64 * 1024;
const MIN_SECRET_LEN: usize = 32;
const MAX_JWT_EXPIRY_HOURS: i64 = 24 * 365;

/// Base configuration shared by both services
#[derive(Clone)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Shared secret for upload metadata signatures. Must match across services.
    pub signing_secret: String,
    pub max_body_bytes: usize,
}

impl BaseConfig {
    fn from_env(port_var: &str, default_port: u16) -> Self {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        BaseConfig {
            server_port: env::var(port_var)
                .or_else(|_| env::var("PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(default_port),
            cors_origins,
            environment,
            signing_secret: env::var("SIGNING_SECRET")
                .or_else(|_| env::var("JWT_SECRET"))
                .unwrap_or_default(),
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_BODY_BYTES),
        }
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.signing_secret.len() < MIN_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "SIGNING_SECRET (or JWT_SECRET) must be at least {} characters long",
                MIN_SECRET_LEN
            ));
        }
        if self.cors_origins.is_empty() {
            return Err(anyhow::anyhow!("CORS_ORIGINS must not be empty"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for BaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseConfig")
            .field("server_port", &self.server_port)
            .field("cors_origins", &self.cors_origins)
            .field("environment", &self.environment)
            .field("signing_secret", &"[REDACTED]")
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

/// Broker (storage-side) configuration
#[derive(Clone, Debug)]
pub struct BrokerConfig {
    pub base: BaseConfig,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub presign_expiry_secs: u64,
    /// Probe the object store before confirming an upload. Off by default.
    pub verify_object_exists: bool,
}

impl BrokerConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config = BrokerConfig {
            base: BaseConfig::from_env("STORAGE_SERVICE_PORT", BROKER_PORT),
            s3_bucket: env::var("AWS_BUCKET")
                .or_else(|_| env::var("S3_BUCKET"))
                .ok()
                .filter(|s| !s.is_empty()),
            s3_region: env::var("AWS_DEFAULT_REGION")
                .or_else(|_| env::var("S3_REGION"))
                .or_else(|_| env::var("AWS_REGION"))
                .ok()
                .filter(|s| !s.is_empty()),
            s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
            presign_expiry_secs: env::var("PRESIGN_EXPIRY_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(PRESIGN_EXPIRY_SECS),
            verify_object_exists: env::var("VERIFY_OBJECT_EXISTS")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.base.validate()?;

        if self.s3_bucket.is_none() {
            return Err(anyhow::anyhow!("AWS_BUCKET (or S3_BUCKET) must be set"));
        }
        if self.s3_region.is_none() {
            return Err(anyhow::anyhow!(
                "AWS_DEFAULT_REGION, S3_REGION or AWS_REGION must be set"
            ));
        }
        if self.presign_expiry_secs == 0 || self.presign_expiry_secs > 7 * 24 * 3600 {
            return Err(anyhow::anyhow!(
                "PRESIGN_EXPIRY_SECS must be between 1 and 604800"
            ));
        }
        Ok(())
    }

    pub fn presign_expiry(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.presign_expiry_secs)
    }
}

/// Front service configuration
#[derive(Clone)]
pub struct FrontConfig {
    pub base: BaseConfig,
    pub broker_url: String,
    pub broker_timeout_secs: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    /// Mount `POST /auth/token`. Defaults to on outside production.
    pub issue_test_tokens: bool,
}

impl FrontConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let base = BaseConfig::from_env("APP_PORT", FRONT_PORT);
        let is_production = base.is_production();

        let config = FrontConfig {
            base,
            broker_url: env::var("STORAGE_SERVICE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", BROKER_PORT))
                .trim_end_matches('/')
                .to_string(),
            broker_timeout_secs: env::var("BROKER_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(BROKER_TIMEOUT_SECS),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(JWT_EXPIRY_HOURS),
            issue_test_tokens: env::var("ISSUE_TEST_TOKENS")
                .ok()
                .and_then(|s| s.to_lowercase().parse().ok())
                .unwrap_or(!is_production),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.base.validate()?;

        if self.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters long",
                MIN_SECRET_LEN
            ));
        }
        if !(self.broker_url.starts_with("http://") || self.broker_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "STORAGE_SERVICE_URL must be an http(s) URL"
            ));
        }
        if self.jwt_expiry_hours <= 0 || self.jwt_expiry_hours > MAX_JWT_EXPIRY_HOURS {
            return Err(anyhow::anyhow!(
                "JWT_EXPIRY_HOURS must be between 1 and {}",
                MAX_JWT_EXPIRY_HOURS
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for FrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrontConfig")
            .field("base", &self.base)
            .field("broker_url", &self.broker_url)
            .field("broker_timeout_secs", &self.broker_timeout_secs)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("issue_test_tokens", &self.issue_test_tokens)
            .finish()
    }
}
