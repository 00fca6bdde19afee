//! Shop configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JWT_SECRET` - Token signing secret (min 32 bytes)
//!
//! ## Optional
//! - `SHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOP_PORT` - Listen port (default: 3000)
//! - `JWT_EXPIRATION_HOURS` - Token lifetime (default: 24)
//! - `JWT_ISSUER` - Token issuer claim (default: actor-shop)
//! - `PASSWORD_HASH_MEMORY_KIB`, `PASSWORD_HASH_ITERATIONS`,
//!   `PASSWORD_HASH_PARALLELISM` - Argon2 cost (default: argon2 crate defaults)
//! - `WEBHOOK_SECRET` - Shared secret expected in `X-Webhook-Secret` on the
//!   order status webhook; the webhook is open when unset
//! - `ACTOR_CHANNEL_CAPACITY` - Request buffer per actor (default: 32)
//! - `ADMIN_USERNAME`, `ADMIN_PASSWORD`, `ADMIN_EMAIL` - Seed an admin account
//!   at startup; username and password must be set together

use crate::credentials::{
    PasswordHasherConfig, DEFAULT_TOKEN_EXPIRATION_HOURS, DEFAULT_TOKEN_ISSUER,
};
use secrecy::{ExposeSecret, SecretString};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;

const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin account created when the shop starts.
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: Option<String>,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Shop application configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Token signing secret
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: u64,
    pub jwt_issuer: String,
    pub password_hasher: PasswordHasherConfig,
    pub webhook_secret: Option<SecretString>,
    pub channel_capacity: usize,
    pub admin: Option<AdminSeed>,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `JWT_SECRET` is missing or too short, or if any
    /// variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let jwt_secret = env
            .optional("JWT_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::InsecureSecret(
                "JWT_SECRET".to_string(),
                format!("must be at least {MIN_JWT_SECRET_LENGTH} bytes"),
            ));
        }

        let defaults = PasswordHasherConfig::default();
        let password_hasher = PasswordHasherConfig {
            memory_kib: env.parse_or("PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: env.parse_or("PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: env.parse_or("PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        };
        password_hasher.validate().map_err(|e| {
            ConfigError::InvalidEnvVar("PASSWORD_HASH_*".to_string(), e.to_string())
        })?;

        let channel_capacity: usize = env.parse_or("ACTOR_CHANNEL_CAPACITY", 32)?;
        if channel_capacity == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ACTOR_CHANNEL_CAPACITY".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let admin = match (env.optional("ADMIN_USERNAME"), env.optional("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(AdminSeed {
                username,
                email: env.optional("ADMIN_EMAIL"),
                password: SecretString::from(password),
            }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::InvalidEnvVar(
                    "ADMIN_USERNAME".to_string(),
                    "ADMIN_USERNAME and ADMIN_PASSWORD must be set together".to_string(),
                ))
            }
        };

        Ok(Self {
            host: env.parse_or("SHOP_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: env.parse_or("SHOP_PORT", 3000)?,
            jwt_secret: SecretString::from(jwt_secret),
            jwt_expiration_hours: env
                .parse_or("JWT_EXPIRATION_HOURS", DEFAULT_TOKEN_EXPIRATION_HOURS)?,
            jwt_issuer: env
                .optional("JWT_ISSUER")
                .unwrap_or_else(|| DEFAULT_TOKEN_ISSUER.to_string()),
            password_hasher,
            webhook_secret: env.optional("WEBHOOK_SECRET").map(SecretString::from),
            channel_capacity,
            admin,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// True when the status webhook requires a shared secret.
    pub fn webhook_protected(&self) -> bool {
        self.webhook_secret
            .as_ref()
            .is_some_and(|secret| !secret.expose_secret().is_empty())
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Value of `key`, with blank treated as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(key) {
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
            None => Ok(default),
        }
    }
}
