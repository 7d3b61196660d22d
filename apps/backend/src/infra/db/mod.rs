//! Application pool construction and startup migration.

pub mod core;

pub use core::{bootstrap_db, build_pool};

pub use crate::config::db::{DbKind, DbOwner, RuntimeEnv};
