//! Error codes for the employees API.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses. Add new codes here; never pass ad-hoc
//! strings as error codes.

use core::fmt;

/// Centralized error codes for the employees API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// A required employee field is missing
    ValidationError,
    /// Malformed request (bad JSON, wrong types, bad query string)
    BadRequest,
    /// Path segment is not a valid employee id
    InvalidEmployeeId,

    // Resource Not Found
    /// No employee with the requested id
    EmployeeNotFound,

    // System Errors
    /// Unexpected internal failure
    InternalError,
    /// Database statement failed
    DbError,
    /// Database unreachable or pool exhausted
    DbUnavailable,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidEmployeeId => "INVALID_EMPLOYEE_ID",

            Self::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",

            Self::InternalError => "INTERNAL_ERROR",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
