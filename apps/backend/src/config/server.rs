use std::env;

use db_infra::config::db::DbKind;

use crate::error::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// HTTP listener and backend selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_kind: DbKind,
}

impl ServerConfig {
    /// Reads `BACKEND_HOST`, `PORT` and `DB_KIND`.
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("PORT must be a valid port number, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let db_kind = match env::var("DB_KIND") {
            Ok(raw) => raw.parse::<DbKind>()?,
            Err(_) => DbKind::Postgres,
        };

        Ok(Self {
            host,
            port,
            db_kind,
        })
    }
}
