//! DTOs for the employees_sea adapter.

use rust_decimal::Decimal;
use time::Date;

/// Columns of the `employees` row.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeFields {
    pub name: String,
    pub designation: String,
    pub date_of_birth: Date,
    pub salary: Decimal,
}

/// Columns of the `contacts` row. Absent values are written as NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFields {
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Columns of the `emergency_contacts` row. Absent values are written as NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmergencyContactFields {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub relationship: Option<String>,
}
