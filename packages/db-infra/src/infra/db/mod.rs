pub mod core;

pub use core::{build_admin_pool, orchestrate_migration, orchestrate_migration_internal};
