#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

use time::Date;

#[cfg(test)]
pub mod test_bootstrap;

// `YYYY-MM-DD` (de)serialization for `time::Date`
time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

pub use config::server::ServerConfig;
pub use error::AppError;
pub use extractors::{EmployeeId, ValidatedJson};
pub use infra::state::build_state;
pub use middleware::{RequestTrace, StructuredLogger, TraceSpan};
pub use repos::employees::{EmployeeView, Paging};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
