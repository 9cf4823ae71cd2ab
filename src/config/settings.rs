//! Runtime settings from environment variables (optionally loaded from `.env` by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/trivia";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_QUESTIONS_PER_PAGE: usize = 10;

/// Which storage backend the server runs against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    /// In-process store; nothing is persisted.
    Memory,
}

impl StoreKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKind::Postgres => "postgres",
            StoreKind::Memory => "memory",
        }
    }
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => Err(ConfigError::UnknownStore(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub store: StoreKind,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub questions_per_page: usize,
    /// `*` or a single origin.
    pub cors_allow_origin: String,
    /// Defaults to on for the memory store, which otherwise starts without categories.
    pub seed_categories: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.into(),
            store: StoreKind::Postgres,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            db_max_connections: 5,
            questions_per_page: DEFAULT_QUESTIONS_PER_PAGE,
            cors_allow_origin: "*".into(),
            seed_categories: false,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let store = match lookup("TRIVIA_STORE") {
            Some(s) => s.parse()?,
            None => defaults.store,
        };
        let questions_per_page = parse_or("QUESTIONS_PER_PAGE", &lookup, defaults.questions_per_page)?;
        if questions_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                key: "QUESTIONS_PER_PAGE",
                value: "0".into(),
            });
        }
        Ok(Settings {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            store,
            bind_addr: parse_or("BIND_ADDR", &lookup, defaults.bind_addr)?,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", &lookup, defaults.db_max_connections)?,
            questions_per_page,
            cors_allow_origin: lookup("CORS_ALLOW_ORIGIN").unwrap_or(defaults.cors_allow_origin),
            seed_categories: parse_bool("TRIVIA_SEED_CATEGORIES", &lookup, store == StoreKind::Memory)?,
        })
    }
}

fn parse_or<T, F>(key: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

fn parse_bool<F>(key: &'static str, lookup: &F, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::InvalidValue { key, value: raw }),
        },
    }
}
