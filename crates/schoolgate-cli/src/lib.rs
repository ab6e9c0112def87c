//! # Schoolgate CLI
//!
//! Administrative commands behind the `schoolgate-cli` binary.
//!
//! ## Usage
//!
//! ```ignore
//! use schoolgate_cli::commands::{check, CheckRequest};
//!
//! let decision = check(&pool, &config, request).await?;
//! println!("{}", decision);
//! ```

pub mod commands;
