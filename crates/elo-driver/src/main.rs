//! Serial Elo touchscreen driver: entry point.
//!
//! Reads 10-byte touch packets from an Elo controller on a serial port and
//! replays them through a uinput virtual touchscreen.
//!
//! # Usage
//!
//! ```text
//! elotouch [OPTIONS]
//!
//! Options:
//!   -p, --port <PATH>     Serial port the touchscreen is connected to
//!   -b, --baud <N>        Baud rate [default: 9600]
//!       --click-only      Only forward touch down / touch up transitions
//!       --sniff           Only log packets, do not create an input device
//!   -c, --config <PATH>   TOML configuration file
//!   -v, --verbose...      More output (-v warn, -vv info, -vvv debug)
//!       --logfile <PATH>  Append log output to this file
//!       --stdout          Also write log output to stdout
//! ```
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ Cli::parse() + load_config()   -- merged DriverConfig
//!  └─ open_serial()                  -- 8N1, RTS/CTS, 1 s timeout
//!  └─ UinputTouchSink / LoggingSink  -- chosen by --sniff
//!  └─ spawn_blocking(run_driver)     -- byte loop until Ctrl-C or I/O error
//! ```
//!
//! # Exit status
//!
//! `0` after Ctrl-C, non-zero when the port cannot be opened, the input
//! device cannot be created, or the port fails while running.

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use elo_driver::application::forward_touch::{ForwardTouchUseCase, TouchSink};
use elo_driver::application::run::run_driver;
use elo_driver::infrastructure::logging::{init_logging, LogOptions};
use elo_driver::infrastructure::serial::open_serial;
use elo_driver::infrastructure::storage::config::{
    load_config, ConfigOverrides, DriverConfig, TouchConfig,
};
use elo_driver::infrastructure::touch_sink::LoggingSink;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Runs the serial Elo touchscreen driver.
#[derive(Debug, Parser)]
#[command(name = "elotouch", about = "Serial Elo touch driver (protocol E271-2210)", version)]
struct Cli {
    /// Serial port where the Elo touchscreen is connected.
    #[arg(short, long, env = "ELOTOUCH_PORT")]
    port: Option<String>,

    /// Baud rate to use [default: 9600].
    #[arg(short, long)]
    baud: Option<u32>,

    /// Only forward changes of the contact state (touch down / touch up).
    #[arg(long)]
    click_only: bool,

    /// Only listen for packets, do not forward them to an input device.
    #[arg(long)]
    sniff: bool,

    /// TOML configuration file; command-line values take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print out warnings (-v), info (-vv) and debug (-vvv) messages.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Append log output to this file instead of stderr.
    #[arg(long)]
    logfile: Option<PathBuf>,

    /// Also write log output to standard out.
    #[arg(long)]
    stdout: bool,
}

impl Cli {
    fn log_options(&self) -> LogOptions {
        LogOptions {
            verbosity: self.verbose,
            logfile: self.logfile.clone(),
            stdout: self.stdout,
        }
    }

    /// Loads the config file (if any) and applies the command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    fn into_driver_config(self) -> anyhow::Result<DriverConfig> {
        let base = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => DriverConfig::default(),
        };
        Ok(base.apply(ConfigOverrides {
            port: self.port,
            baud: self.baud,
            click_only: self.click_only,
            sniff: self.sniff,
        }))
    }
}

// ── Sink selection ────────────────────────────────────────────────────────────

fn build_sink(touch: &TouchConfig) -> anyhow::Result<Arc<dyn TouchSink>> {
    if touch.sniff {
        info!("sniff mode: packets are logged, no input device is created");
        return Ok(Arc::new(LoggingSink::new()));
    }

    #[cfg(target_os = "linux")]
    {
        use elo_driver::infrastructure::touch_sink::linux::UinputTouchSink;

        let sink = UinputTouchSink::new(touch.pressure_max)
            .context("failed to create uinput device (is /dev/uinput writable?)")?;
        Ok(Arc::new(sink))
    }

    #[cfg(not(target_os = "linux"))]
    {
        anyhow::bail!("virtual input devices are only supported on Linux; run with --sniff")
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_options()).context("failed to initialise logging")?;

    let config = cli.into_driver_config()?;
    let settings = config.serial_settings().context("invalid configuration")?;

    let mut source = match open_serial(&settings) {
        Ok(source) => source,
        Err(e) => {
            error!("{e}");
            return Err(e.into());
        }
    };

    let sink = build_sink(&config.touch)?;
    let mut use_case = ForwardTouchUseCase::new(sink, config.touch.click_only);

    // Shutdown flag shared with the blocking read loop.
    let running = Arc::new(AtomicBool::new(true));

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_clone.store(false, Ordering::Relaxed);
        }
    });

    info!(
        port = %settings.port,
        baud = settings.baud,
        click_only = config.touch.click_only,
        "elotouch running. Press Ctrl-C to exit."
    );

    // The serial port blocks for up to one read timeout, so the loop runs
    // on the blocking pool and sees the flag within a second of Ctrl-C.
    let loop_running = Arc::clone(&running);
    let outcome = tokio::task::spawn_blocking(move || {
        run_driver(&mut source, &mut use_case, &loop_running)
    })
    .await
    .context("driver task panicked")?;

    match outcome {
        Ok(summary) => {
            info!(
                bytes_read = summary.bytes_read,
                touch_events = summary.stats.touch_events,
                checksum_failures = summary.stats.checksum_failures,
                unsynchronized_bytes = summary.stats.unsynchronized_bytes,
                "elotouch stopped"
            );
            Ok(())
        }
        Err(e) => {
            error!("{e}");
            Err(e).context("driver stopped")
        }
    }
}
