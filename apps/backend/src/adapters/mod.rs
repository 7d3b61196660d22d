//! Adapters for external dependencies.

pub mod employees_sea;
