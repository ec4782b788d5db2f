use std::sync::Once;

use log::LevelFilter;

/// Filter applied when neither the config nor `RUST_LOG` names one.
const FALLBACK_LEVEL: LevelFilter = LevelFilter::Info;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax, e.g. "rewind_engine=trace"
/// to see every rewind segment, or "rewind_engine::core=debug,warn".
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }

    /// Per-segment and per-undo tracing from the engine, `info` elsewhere.
    pub fn verbose() -> Self {
        Self::with_filter("info,rewind_engine=trace")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Picks the filter string: explicit config wins over the environment.
/// `None` means fall back to [`FALLBACK_LEVEL`].
fn resolve_filter(explicit: Option<String>, env: Option<String>) -> Option<String> {
    explicit
        .or(env)
        .filter(|f| !f.trim().is_empty())
}

static INIT: Once = Once::new();

/// Installs an `env_logger` backend for the `log` facade, once.
///
/// Later calls do nothing. If another logger is already installed it is left
/// in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok()) {
            Some(filter) => builder.parse_filters(&filter),
            None => builder.filter_level(FALLBACK_LEVEL),
        };
        builder.write_style(config.write_style);

        match builder.try_init() {
            Ok(()) => log::debug!("logging initialized"),
            Err(_) => log::debug!("logger already installed; keeping it"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_beats_environment() {
        let f = resolve_filter(Some("warn".into()), Some("trace".into()));
        assert_eq!(f.as_deref(), Some("warn"));
    }

    #[test]
    fn environment_used_without_explicit_filter() {
        let f = resolve_filter(None, Some("rewind_engine=debug".into()));
        assert_eq!(f.as_deref(), Some("rewind_engine=debug"));
    }

    #[test]
    fn blank_filter_falls_back() {
        assert_eq!(resolve_filter(Some("  ".into()), None), None);
        assert_eq!(resolve_filter(None, None), None);
    }

    #[test]
    fn verbose_traces_engine_only() {
        let cfg = LoggingConfig::verbose();
        assert_eq!(cfg.env_filter.as_deref(), Some("info,rewind_engine=trace"));
        assert!(matches!(cfg.write_style, env_logger::WriteStyle::Auto));
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging(LoggingConfig::with_filter("warn"));
        init_logging(LoggingConfig::default());
        log::info!("still alive");
    }
}
