//! Logging setup for binaries and tests that drive searches.
//!
//! The engine and runner only emit `tracing` events; nothing is printed
//! unless a subscriber is installed. [`init_logging`] installs one writing to
//! stderr, so stdout stays free for fixture output.
//!
//! The `WAYPOINT_LOG` environment variable, when set to a valid filter,
//! overrides the configured level and module directives.

use std::collections::BTreeMap;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV_VAR: &str = "WAYPOINT_LOG";

/// Output format of the stderr layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Base level: `trace`, `debug`, `info`, `warn`, `error` or `off`.
    pub level: String,
    pub format: LogFormat,
    /// Per-target levels, e.g. `waypoint_search` → `trace`.
    pub modules: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
            modules: BTreeMap::new(),
        }
    }
}

/// Error from [`init_logging`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    /// The configured level or a module directive does not parse.
    InvalidDirective { directive: String, detail: String },
    /// A global subscriber is already installed.
    AlreadyInitialized,
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDirective { directive, detail } => {
                write!(f, "invalid log directive {directive:?}: {detail}")
            }
            Self::AlreadyInitialized => f.write_str("a global tracing subscriber is already set"),
        }
    }
}

impl std::error::Error for LoggingError {}

/// Directive string for `config`: the level, then `target=level` per module.
#[must_use]
pub fn directives(config: &LoggingConfig) -> String {
    let mut out = config.level.clone();
    for (target, level) in &config.modules {
        out.push(',');
        out.push_str(target);
        out.push('=');
        out.push_str(level);
    }
    out
}

/// Build the filter, preferring `env_override` when it parses.
///
/// # Errors
///
/// Returns [`LoggingError::InvalidDirective`] if the configured directives do
/// not parse. An unparsable override is ignored.
pub fn build_env_filter(
    config: &LoggingConfig,
    env_override: Option<&str>,
) -> Result<EnvFilter, LoggingError> {
    if let Some(filter) = env_override.and_then(|raw| EnvFilter::try_new(raw).ok()) {
        return Ok(filter);
    }
    let directive = directives(config);
    EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidDirective {
        directive,
        detail: e.to_string(),
    })
}

/// Install the global subscriber.
///
/// Calling it a second time returns [`LoggingError::AlreadyInitialized`] and
/// leaves the first subscriber in place.
///
/// # Errors
///
/// Returns [`LoggingError`] for bad directives or a second initialization.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let env_override = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_env_filter(config, env_override.as_deref())?;
    let base = Registry::default().with(filter);

    let installed = match config.format {
        LogFormat::Text => base
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => base
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    installed.map_err(|_| LoggingError::AlreadyInitialized)
}
