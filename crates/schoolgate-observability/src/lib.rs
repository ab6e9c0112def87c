//! # Schoolgate Observability
//!
//! Logging and metrics setup shared by every schoolgate binary.
//!
//! - [`logging`]: Console tracing subscriber, compact or JSON
//! - [`metrics`]: Prometheus recorder and the authorization counters
//!
//! # Example
//!
//! ```no_run
//! use schoolgate_observability::{init_metrics, init_tracing};
//!
//! init_tracing();
//! let handle = init_metrics().ok();
//! ```

pub mod logging;
pub mod metrics;

pub use self::logging::init_tracing;
pub use self::metrics::{init_metrics, is_metrics_enabled};
