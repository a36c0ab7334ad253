use std::env;
use std::path::PathBuf;

use crate::lifecycle::TransitionPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Runtime settings, read once at startup and shared with handlers as app data.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub media_root: PathBuf,
    pub rental_transitions: TransitionPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let port = parse_var("PORT", 8080)?;
        let token_ttl_hours = parse_var("TOKEN_TTL_HOURS", 24)?;

        let media_root = env::var("MEDIA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./media"));

        let rental_transitions = match env::var("RENTAL_TRANSITIONS") {
            Ok(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                name: "RENTAL_TRANSITIONS",
                reason,
            })?,
            Err(_) => TransitionPolicy::default(),
        };

        Ok(Self {
            database_url,
            port,
            jwt_secret,
            token_ttl_hours,
            media_root,
            rental_transitions,
        })
    }
}

fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
