//! # Schoolgate Core
//!
//! Core types shared by every schoolgate crate.
//!
//! - [`errors`]: Application error type with HTTP status conversion
//! - [`capabilities`]: Coarse capability strings granted to role groups
//!
//! # Example
//!
//! ```ignore
//! use schoolgate_core::errors::AppError;
//! use schoolgate_core::capabilities;
//!
//! let error = AppError::forbidden("Teachers cannot publish assessments".to_string());
//! assert_eq!(capabilities::GRADE_UPDATE, "grade:update");
//! ```

pub mod capabilities;
pub mod errors;

pub use errors::AppError;
