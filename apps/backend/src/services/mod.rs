//! Write-side services. Each operation is one transaction.

pub mod employees;
