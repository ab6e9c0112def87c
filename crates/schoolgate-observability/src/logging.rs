use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format of the console layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    /// Reads `LOG_FORMAT`; `json` selects JSON lines, anything else compact.
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Filter directives used when `RUST_LOG` is unset.
///
/// `LOG_LEVEL` (default `info`) applies to the schoolgate crates; sqlx is kept
/// at warn.
pub fn default_directives(log_level: &str) -> String {
    let crates = [
        "schoolgate",
        "schoolgate_authz",
        "schoolgate_db",
        "schoolgate_cli",
        "schoolgate_config",
    ];
    let mut directives: Vec<String> = crates
        .iter()
        .map(|name| format!("{}={}", name, log_level))
        .collect();
    directives.push("sqlx=warn".to_string());
    directives.join(",")
}

/// Installs the global console subscriber.
///
/// Safe to call more than once; later calls are ignored so tests and binaries
/// can both initialise logging.
pub fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&log_level)));

    let console_layer = match LogFormat::from_env() {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter)
            .boxed(),
    };

    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
