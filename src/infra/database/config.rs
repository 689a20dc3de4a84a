//! Database configuration resolved from the environment.

use std::env;
use std::time::Duration;

use secrecy::SecretString;

use crate::domain::ConfigError;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Immutable database configuration, constructed once at startup.
///
/// The connection string is held as a secret since it normally embeds
/// credentials. `driver` keeps the raw selector value; resolving it into a
/// [`DriverKind`](crate::domain::DriverKind) is the factory's job so that
/// invalid values can fall back with a warning instead of failing here.
#[derive(Debug)]
pub struct DatabaseConfig {
    pub connection_string: SecretString,
    pub driver: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Clone for DatabaseConfig {
    fn clone(&self) -> Self {
        use secrecy::ExposeSecret;
        Self {
            connection_string: SecretString::from(self.connection_string.expose_secret()),
            driver: self.driver.clone(),
            max_connections: self.max_connections,
            acquire_timeout: self.acquire_timeout,
            idle_timeout: self.idle_timeout,
        }
    }
}

impl DatabaseConfig {
    /// Creates a configuration with default pool settings.
    #[must_use]
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: SecretString::from(connection_string.into()),
            driver: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    /// Sets the raw driver selector value.
    #[must_use]
    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = Some(driver.into());
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// `DATABASE_URL` is required. `DATABASE_DRIVER` is optional and left
    /// unvalidated here. Pool knobs (`DATABASE_MAX_CONNECTIONS`,
    /// `DATABASE_ACQUIRE_TIMEOUT_SECS`, `DATABASE_IDLE_TIMEOUT_SECS`) are
    /// optional with defaults, but a present-and-malformed value is an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when `DATABASE_URL` is absent and
    /// `ConfigError::InvalidValue` for unparsable numeric knobs.
    pub fn from_env() -> Result<Self, ConfigError> {
        let connection_string = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let driver = env::var("DATABASE_DRIVER").ok();

        let max_connections =
            parse_env_var("DATABASE_MAX_CONNECTIONS")?.unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let acquire_timeout = parse_env_var("DATABASE_ACQUIRE_TIMEOUT_SECS")?
            .map_or(DEFAULT_ACQUIRE_TIMEOUT, Duration::from_secs);
        let idle_timeout = parse_env_var("DATABASE_IDLE_TIMEOUT_SECS")?
            .map_or(DEFAULT_IDLE_TIMEOUT, Duration::from_secs);

        Ok(Self {
            connection_string: SecretString::from(connection_string),
            driver,
            max_connections,
            acquire_timeout,
            idle_timeout,
        })
    }
}

fn parse_env_var<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
