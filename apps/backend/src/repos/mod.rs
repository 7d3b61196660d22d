//! Read-side repositories for the domain layer.

pub mod employees;
