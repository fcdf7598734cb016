//! Optional `env_logger` setup for binaries and demos.
//!
//! Library code logs through `log` only. Without an explicit filter or
//! `RUST_LOG`, other crates are held at `warn` and this crate logs at `info`,
//! or at `debug` when `verbose` is set.

use std::sync::Once;

use log::LevelFilter;

const CRATE_TARGET: &str = "gosub_map_renderer";

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Filter in `env_logger` syntax. Overrides `RUST_LOG`.
    pub filter: Option<String>,
    /// Lowers this crate's default level to `debug`
    pub verbose: bool,
    /// Routes output through the test harness capture
    pub is_test: bool,
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            filter: Some(filter.into()),
            ..Default::default()
        }
    }

    /// Resolves the filter string: explicit filter, then the environment
    /// value, then the crate default.
    pub fn resolve_filter(&self, env: Option<String>) -> String {
        if let Some(filter) = &self.filter {
            return filter.clone();
        }
        if let Some(filter) = env.filter(|f| !f.trim().is_empty()) {
            return filter;
        }
        let level = if self.verbose { LevelFilter::Debug } else { LevelFilter::Info };
        format!("{},{}={}", LevelFilter::Warn, CRATE_TARGET, level).to_lowercase()
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the global logger. Only the first call has any
/// effect, and a logger the host installed earlier is left alone.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.resolve_filter(std::env::var(env_logger::DEFAULT_FILTER_ENV).ok());
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter).is_test(config.is_test);

        if builder.try_init().is_ok() {
            log::debug!(target: CRATE_TARGET, "logging initialized with filter {filter:?}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_quiets_other_crates() {
        let config = LoggingConfig::default();
        assert_eq!(config.resolve_filter(None), "warn,gosub_map_renderer=info");

        let verbose = LoggingConfig {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(verbose.resolve_filter(None), "warn,gosub_map_renderer=debug");
    }

    #[test]
    fn explicit_filter_wins_over_environment() {
        let config = LoggingConfig::with_filter("gosub_map_renderer=trace");
        assert_eq!(config.resolve_filter(Some("error".into())), "gosub_map_renderer=trace");

        let config = LoggingConfig::default();
        assert_eq!(config.resolve_filter(Some("error".into())), "error");
        assert_eq!(config.resolve_filter(Some("  ".into())), "warn,gosub_map_renderer=info");
    }

    #[test]
    fn repeated_init_is_harmless() {
        let config = LoggingConfig {
            is_test: true,
            ..Default::default()
        };
        init_logging(config.clone());
        init_logging(config);
        log::info!("still logging");
    }
}
