//! Runtime configuration read from the environment.
//!
//! Built once at process start (after `.env` is loaded) and passed explicitly
//! to everything that needs it; nothing else in the crate reads the
//! environment.

use crate::errors::{Error, Result};
use std::path::PathBuf;
use std::str::FromStr;

/// Fallback when neither `DATABASE_URL` nor `PGHOST` is set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/ticket_desk.sqlite?mode=rwc";

/// How the seed loader holds its database connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConnectionStrategy {
    /// Exactly one connection for the whole run
    #[default]
    Direct,
    /// A managed pool with the driver's default sizing
    Pooled,
}

impl FromStr for ConnectionStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "pooled" => Ok(Self::Pooled),
            other => Err(Error::Config {
                message: format!("Unknown connection strategy '{other}' (expected direct or pooled)"),
            }),
        }
    }
}

/// What the seed loader does when something goes wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// One transaction for the whole run; any failure rolls everything back
    #[default]
    Transactional,
    /// No wrapping transaction; bad rows are logged and skipped in every table
    RowTolerant,
}

impl FromStr for FailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transactional" => Ok(Self::Transactional),
            "row-tolerant" | "row_tolerant" => Ok(Self::RowTolerant),
            other => Err(Error::Config {
                message: format!(
                    "Unknown seed policy '{other}' (expected transactional or row-tolerant)"
                ),
            }),
        }
    }
}

/// Everything the seed binary needs to know before it connects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Connection URL understood by `SeaORM`
    pub database_url: String,
    /// Direct connection or pool
    pub connection: ConnectionStrategy,
    /// Failure handling for the seed run
    pub policy: FailurePolicy,
    /// Dataset file; `None` means the built-in placeholder dataset
    pub dataset_path: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => match get("PGHOST") {
                Some(host) => postgres_url(&host, &get)?,
                None => DEFAULT_DATABASE_URL.to_string(),
            },
        };

        let connection = get("SEED_CONNECTION")
            .map(|v| v.parse::<ConnectionStrategy>())
            .transpose()?
            .unwrap_or_default();
        let policy = get("SEED_POLICY")
            .map(|v| v.parse::<FailurePolicy>())
            .transpose()?
            .unwrap_or_default();
        let dataset_path = get("SEED_DATA").map(PathBuf::from);

        Ok(Self {
            database_url,
            connection,
            policy,
            dataset_path,
        })
    }

    /// The database URL with any password replaced, for logging.
    #[must_use]
    pub fn redacted_database_url(&self) -> String {
        redact_password(&self.database_url)
    }
}

fn postgres_url<G>(host: &str, get: &G) -> Result<String>
where
    G: Fn(&str) -> Option<String>,
{
    let port = get("PGPORT").unwrap_or_else(|| "5432".to_string());
    if port.parse::<u16>().is_err() {
        return Err(Error::Config {
            message: format!("PGPORT '{port}' is not a valid port"),
        });
    }
    let user = get("PGUSER").ok_or_else(|| Error::Config {
        message: "PGHOST is set but PGUSER is missing".to_string(),
    })?;
    let database = get("PGDATABASE").unwrap_or_else(|| user.clone());

    Ok(match get("PGPASSWORD") {
        Some(password) => format!("postgres://{user}:{password}@{host}:{port}/{database}"),
        None => format!("postgres://{user}@{host}:{port}/{database}"),
    })
}

fn redact_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, location)) = rest.split_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{location}"),
        None => url.to_string(),
    }
}
