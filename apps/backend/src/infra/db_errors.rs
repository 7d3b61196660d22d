//! SeaORM -> DomainError translation.
//!
//! Adapters return `sea_orm::DbErr`; repos and services convert here, and
//! handlers map the resulting `DomainError` to `AppError` via `From`.
//! Raw driver messages are only ever logged through `Redacted`.

use tracing::{error, warn};

use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Constraint family a driver message refers to, for logging only.
fn constraint_kind(msg: &str) -> Option<&'static str> {
    if mentions_sqlstate(msg, "23502") || msg.contains("NOT NULL constraint failed") {
        return Some("not_null");
    }
    if mentions_sqlstate(msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
    {
        return Some("unique");
    }
    if mentions_sqlstate(msg, "23503") || msg.contains("FOREIGN KEY constraint failed") {
        return Some("foreign_key");
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Employee, "Employee not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if let Some(constraint) = constraint_kind(&error_msg) {
        warn!(
            trace_id = %trace_id,
            constraint,
            raw_error = %Redacted(&error_msg),
            "Constraint violation"
        );
        return DomainError::infra(
            InfraErrorKind::Other("Constraint".into()),
            format!("{constraint} constraint violation"),
        );
    }

    if error_msg.contains("timeout")
        || error_msg.contains("pool")
        || error_msg.contains("unavailable")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
