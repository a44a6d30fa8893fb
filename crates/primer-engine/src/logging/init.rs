use env_logger::fmt::TimestampPrecision;

/// Filter used when neither the caller nor `RUST_LOG` name one.
///
/// wgpu's internals log every resource creation at info.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` directives such as `"debug"` or `"primer_lessons=trace,warn"`.
    pub filter: Option<String>,
    pub style: env_logger::WriteStyle,
    /// Prefix each line with wall-clock milliseconds.
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            style: env_logger::WriteStyle::Auto,
            timestamps: true,
        }
    }
}

/// First non-blank of the explicit filter, the environment's, then [`DEFAULT_FILTER`].
pub fn resolve_filter(explicit: Option<&str>, env: Option<&str>) -> String {
    [explicit, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|f| !f.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Installs the global logger.
///
/// Returns `false` when a logger was already installed; the earlier one stays
/// in place, so calling this twice is harmless.
pub fn init_logging(config: LoggingConfig) -> bool {
    let env = std::env::var("RUST_LOG").ok();
    let filter = resolve_filter(config.filter.as_deref(), env.as_deref());

    let installed = env_logger::Builder::new()
        .parse_filters(&filter)
        .write_style(config.style)
        .format_timestamp(config.timestamps.then_some(TimestampPrecision::Millis))
        .try_init()
        .is_ok();

    if installed {
        log::debug!("logging initialized with filter {filter:?}");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        assert_eq!(resolve_filter(Some("debug"), Some("warn")), "debug");
    }

    #[test]
    fn blank_filters_fall_through() {
        assert_eq!(resolve_filter(Some("  "), Some("warn")), "warn");
        assert_eq!(resolve_filter(None, Some("")), DEFAULT_FILTER);
        assert_eq!(resolve_filter(None, None), DEFAULT_FILTER);
    }

    #[test]
    fn second_init_is_refused() {
        init_logging(LoggingConfig::default());
        assert!(!init_logging(LoggingConfig::default()));
    }
}
