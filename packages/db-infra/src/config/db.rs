use std::env;
use std::fmt;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::DbInfraError;

/// Runtime environment the process is running in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    /// Production runtime
    Prod,
    /// Test runtime - enforces safety rules on database names
    Test,
}

/// Database engine + storage flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl DbKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbKind::Postgres => "postgres",
            DbKind::SqliteFile => "sqlite-file",
            DbKind::SqliteMemory => "sqlite-memory",
        }
    }

    pub fn is_sqlite(&self) -> bool {
        matches!(self, DbKind::SqliteFile | DbKind::SqliteMemory)
    }
}

impl fmt::Display for DbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbKind {
    type Err = DbInfraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite_file" | "sqlite" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(DbInfraError::config(format!(
                "unknown database kind '{other}' (expected postgres | sqlite-file | sqlite-memory)"
            ))),
        }
    }
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// Pool sizing for a given environment and database kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub pool_min: u32,
    pub pool_max: u32,
    pub acquire_timeout_ms: u64,
}

/// Pool sizing defaults.
///
/// In-memory SQLite gets exactly one connection: every new connection would
/// open a fresh, empty database.
pub fn pool_settings(env: RuntimeEnv, db_kind: DbKind) -> PoolSettings {
    match (env, db_kind) {
        (_, DbKind::SqliteMemory) => PoolSettings {
            pool_min: 1,
            pool_max: 1,
            acquire_timeout_ms: 5_000,
        },
        (_, DbKind::SqliteFile) => PoolSettings {
            pool_min: 1,
            pool_max: 4,
            acquire_timeout_ms: 5_000,
        },
        (RuntimeEnv::Prod, DbKind::Postgres) => PoolSettings {
            pool_min: 2,
            pool_max: 16,
            acquire_timeout_ms: 2_000,
        },
        (RuntimeEnv::Test, DbKind::Postgres) => PoolSettings {
            pool_min: 1,
            pool_max: 4,
            acquire_timeout_ms: 5_000,
        },
    }
}

/// Reject environment/kind combinations that make no sense.
pub fn validate_db_config(env: RuntimeEnv, db_kind: DbKind) -> Result<(), DbInfraError> {
    if env == RuntimeEnv::Prod && db_kind == DbKind::SqliteMemory {
        return Err(DbInfraError::config(
            "in-memory SQLite is not allowed in the Prod environment",
        ));
    }
    Ok(())
}

/// Builds a connection string for the given environment, kind and owner.
pub fn make_conn_spec(
    env: RuntimeEnv,
    db_kind: DbKind,
    owner: DbOwner,
) -> Result<String, DbInfraError> {
    match db_kind {
        DbKind::Postgres => {
            let host = host();
            let port = port();
            let db_name = db_name(env)?;
            let (username, password) = credentials(owner)?;
            let username = utf8_percent_encode(&username, NON_ALPHANUMERIC);
            let password = utf8_percent_encode(&password, NON_ALPHANUMERIC);

            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => Ok(format!("sqlite://{}?mode=rwc", sqlite_file_spec(env)?)),
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// Path of the SQLite database file for the given environment
pub fn sqlite_file_spec(env: RuntimeEnv) -> Result<String, DbInfraError> {
    let dir = env::var("SQLITE_DB_DIR").unwrap_or_else(|_| "./data".to_string());
    let file = match env {
        RuntimeEnv::Prod => "employees.db",
        RuntimeEnv::Test => "employees_test.db",
    };
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        return Err(DbInfraError::config("SQLITE_DB_DIR must not be empty"));
    }
    Ok(format!("{dir}/{file}"))
}

/// Get database host from environment (defaults to localhost)
fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get database port from environment (defaults to 5432)
fn port() -> String {
    env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string())
}

/// Get database name based on environment
fn db_name(env: RuntimeEnv) -> Result<String, DbInfraError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(DbInfraError::config(format!(
                    "Test environment requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

/// Get database credentials based on owner
fn credentials(owner: DbOwner) -> Result<(String, String), DbInfraError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((must_var("OWNER_DB_USER")?, must_var("OWNER_DB_PASSWORD")?)),
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, DbInfraError> {
    env::var(name).map_err(|_| {
        DbInfraError::config(format!("Required environment variable '{name}' is not set"))
    })
}
