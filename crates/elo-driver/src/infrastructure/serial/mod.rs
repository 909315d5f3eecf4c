//! Serial transport: the byte source feeding the frame decoder.
//!
//! # Why one byte at a time?
//!
//! The controller streams frames back to back with no delimiter other than
//! the lead byte, and frames can start anywhere in a read buffer.  Reading a
//! single byte per call keeps the decoder contract trivial and costs nothing
//! at 9600 baud (under 1000 bytes per second).
//!
//! # Timeouts
//!
//! The port is opened with a 1 second read timeout.  A read that times out
//! is reported as `Ok(None)` rather than an error so the driver loop can
//! check its shutdown flag and carry on.  Only real I/O failures end a run.
//!
//! # Testability
//!
//! The [`ByteSource`] trait lets unit tests inject scripted bytes (see
//! [`mock::ScriptedByteSource`]) without a serial port.

use std::io::{ErrorKind, Read};
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use thiserror::Error;
use tracing::info;

pub mod mock;

/// Default line speed of Elo serial controllers.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// How long a single read waits before reporting a timeout.
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Error type for the serial transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The port could not be opened or configured.
    #[error("failed to open serial port {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    /// A read failed for a reason other than a timeout.
    #[error("serial read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The source has no more bytes and never will.
    #[error("byte source closed")]
    Closed,
}

/// A source of single bytes.
///
/// The production implementation reads a serial port; tests use
/// [`mock::ScriptedByteSource`].
pub trait ByteSource: Send {
    /// Waits for the next byte.
    ///
    /// Returns `Ok(None)` when no byte arrived within the source's timeout.
    fn read_byte(&mut self) -> Result<Option<u8>, TransportError>;
}

/// Line settings for [`open_serial`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialSettings {
    /// Device path, e.g. `/dev/ttyS0` or `/dev/ttyUSB0`.
    pub port: String,
    /// Line speed in bits per second.
    pub baud: u32,
    /// Per-read timeout.
    pub timeout: Duration,
}

impl SerialSettings {
    /// Settings for `port` at the default baud rate and timeout.
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud: DEFAULT_BAUD_RATE,
            timeout: READ_TIMEOUT,
        }
    }
}

/// Adapts any blocking reader with timeout semantics into a [`ByteSource`].
///
/// `ErrorKind::TimedOut`, `ErrorKind::WouldBlock` and `ErrorKind::Interrupted`,
/// as well as zero-length reads, are reported as timeouts.
pub struct ReaderByteSource<R> {
    reader: R,
}

impl<R: Read + Send> ReaderByteSource<R> {
    /// Wraps `reader`.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Send> ByteSource for ReaderByteSource<R> {
    fn read_byte(&mut self) -> Result<Option<u8>, TransportError> {
        let mut buf = [0u8; 1];
        match self.reader.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(TransportError::Io(e)),
        }
    }
}

/// A serial port opened by [`open_serial`].
pub type SerialByteSource = ReaderByteSource<Box<dyn SerialPort>>;

/// Opens and configures the serial port: 8N1, RTS/CTS hardware flow control.
///
/// # Errors
///
/// Returns [`TransportError::Open`] if the device does not exist, is busy,
/// or rejects the line settings.
pub fn open_serial(settings: &SerialSettings) -> Result<SerialByteSource, TransportError> {
    let port = serialport::new(settings.port.as_str(), settings.baud)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::Hardware)
        .timeout(settings.timeout)
        .open()
        .map_err(|source| TransportError::Open {
            port: settings.port.clone(),
            source,
        })?;

    info!(port = %settings.port, baud = settings.baud, "port successfully opened");
    Ok(ReaderByteSource::new(port))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
