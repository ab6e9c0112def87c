use anyhow::anyhow;
use metrics::{Unit, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use schoolgate_core::AppError;

/// Reads `OBSERVABILITY_ENABLED`; enabled unless set to `false` or `0`.
pub fn is_metrics_enabled() -> bool {
    std::env::var("OBSERVABILITY_ENABLED")
        .map(|v| v.to_lowercase() != "false" && v != "0")
        .unwrap_or(true)
}

/// Installs the Prometheus recorder and describes the schoolgate counters.
///
/// The returned handle renders the text exposition format.
pub fn init_metrics() -> Result<PrometheusHandle, AppError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| AppError::internal(anyhow!("Failed to install Prometheus recorder: {}", e)))?;

    describe_counter!(
        "authz_decisions_total",
        Unit::Count,
        "Authorization decisions by resource, action and outcome"
    );
    describe_counter!(
        "role_assignments_total",
        Unit::Count,
        "Successful role assignments by role"
    );

    Ok(handle)
}
