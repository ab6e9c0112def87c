//! # Schoolgate DB
//!
//! PostgreSQL access for schoolgate.
//!
//! The authorization engine never queries the database itself. This crate
//! loads what it needs up front and owns the one write it performs:
//!
//! - [`directory`]: Load the relationship graph into a [`SchoolDirectory`]
//! - [`identity`]: Build an [`IdentityContext`] for a user
//! - [`groups`]: [`PgGroupStore`] and role group synchronisation
//! - [`records`]: Fetch a single protected record by kind and id
//!
//! # Example
//!
//! ```ignore
//! use schoolgate_db::{init_db_pool, load_directory, load_identity};
//!
//! let pool = init_db_pool().await?;
//! let directory = load_directory(&pool).await?;
//! let identity = load_identity(&pool, user_id).await?;
//! ```
//!
//! [`SchoolDirectory`]: schoolgate_authz::SchoolDirectory
//! [`IdentityContext`]: schoolgate_authz::IdentityContext

use anyhow::anyhow;
use schoolgate_core::AppError;
use std::env;
use tracing::info;

pub mod directory;
pub mod groups;
pub mod identity;
pub mod records;

pub use directory::load_directory;
pub use groups::{PgGroupStore, sync_role_groups};
pub use identity::load_identity;
pub use records::{Record, fetch_record};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects to the database named by `DATABASE_URL`.
pub async fn init_db_pool() -> Result<PgPool, AppError> {
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| AppError::internal(anyhow!("DATABASE_URL must be set")))?;

    let pool = PgPool::connect(&database_url)
        .await
        .map_err(|e| AppError::database(anyhow!("Failed to connect to database: {}", e)))?;
    info!("Connected to database");
    Ok(pool)
}

/// Applies the bundled migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(AppError::database)
}
