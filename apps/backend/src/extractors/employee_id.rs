use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Employee id parsed from the `{id}` path segment.
///
/// Only the format is checked here; existence is decided by the query or
/// write that uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeId(pub i64);

impl EmployeeId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let id = raw.trim().parse::<i64>().map_err(|_| {
            AppError::bad_request(
                ErrorCode::InvalidEmployeeId,
                format!("Invalid employee id: {raw}"),
            )
        })?;

        Ok(EmployeeId(id))
    }
}

impl FromRequest for EmployeeId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(match req.match_info().get("id") {
            Some(raw) => EmployeeId::parse(raw),
            None => Err(AppError::bad_request(
                ErrorCode::InvalidEmployeeId,
                "Missing employee id parameter",
            )),
        })
    }
}
