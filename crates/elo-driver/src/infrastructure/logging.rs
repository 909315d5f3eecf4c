//! Logging setup for the driver binary.
//!
//! Verbosity follows the usual `-v` counting convention:
//!
//! | Flags  | Level   |
//! |--------|---------|
//! | (none) | `error` |
//! | `-v`   | `warn`  |
//! | `-vv`  | `info`  |
//! | `-vvv` | `debug` |
//!
//! Decoder diagnostics (unsynchronized bytes, bad checksums) are `warn`
//! records, so `-v` is enough to see line problems.  `RUST_LOG` overrides the
//! flag-derived filter when set.
//!
//! Output goes to stderr, or to `--logfile` (appended) when given.
//! `--stdout` additionally copies every record to standard output.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

/// Error type for logging initialisation.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("a global logger is already installed: {0}")]
    AlreadyInitialised(#[from] TryInitError),
}

/// Where and how much to log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Number of `-v` flags.
    pub verbosity: u8,
    /// Append log records to this file instead of stderr.
    pub logfile: Option<PathBuf>,
    /// Also write log records to stdout.
    pub stdout: bool,
}

/// Maps the `-v` count to an `EnvFilter` directive.
pub fn verbosity_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    }
}

/// Installs the global `tracing` subscriber.
///
/// # Errors
///
/// Returns [`LoggingError::LogFile`] if the log file cannot be opened and
/// [`LoggingError::AlreadyInitialised`] if called twice.
pub fn init_logging(options: &LogOptions) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_directive(options.verbosity)));

    let file_layer = match &options.logfile {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::LogFile {
                    path: path.clone(),
                    source,
                })?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = options
        .logfile
        .is_none()
        .then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    let stdout_layer = options
        .stdout
        .then(|| fmt::layer().with_target(false).with_writer(std::io::stdout));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .with(stdout_layer)
        .try_init()?;
    Ok(())
}
