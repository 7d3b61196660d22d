//! Read side for employees: denormalized views over the three tables.

use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, FromQueryResult};
use serde::Serialize;
use time::Date;

use crate::adapters::employees_sea as employees_adapter;
use crate::errors::domain::DomainError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// An employee merged with its contact and emergency contact.
///
/// Child columns are optional because both joins are LEFT JOINs.
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct EmployeeView {
    pub id: i64,
    pub name: String,
    pub designation: String,
    #[serde(with = "crate::iso_date")]
    pub date_of_birth: Date,
    #[serde(with = "rust_decimal::serde::float")]
    pub salary: Decimal,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub relationship: Option<String>,
}

/// Offset pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    page: u64,
    limit: u64,
}

impl Paging {
    /// Missing values fall back to page 1 / limit 10; `page < 1` becomes 1 and
    /// `limit` is clamped to `1..=MAX_LIMIT`.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.map_or(DEFAULT_PAGE, |p| p.max(1) as u64);
        let limit = limit.map_or(DEFAULT_LIMIT, |l| l.clamp(1, MAX_LIMIT as i64) as u64);
        Self { page, limit }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// `(page - 1) * limit`, saturating at the largest offset SQL accepts.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.limit)
            .min(i64::MAX as u64)
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of employees ordered by id.
pub async fn list_employees<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    paging: Paging,
) -> Result<Vec<EmployeeView>, DomainError> {
    let views = employees_adapter::list_views(conn, paging.offset(), paging.limit()).await?;
    Ok(views)
}

pub async fn get_employee<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    employee_id: i64,
) -> Result<EmployeeView, DomainError> {
    employees_adapter::find_view(conn, employee_id)
        .await?
        .ok_or_else(|| DomainError::employee_not_found(employee_id))
}
