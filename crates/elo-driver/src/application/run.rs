//! Driver loop: pumps bytes from a [`ByteSource`] through the use case.
//!
//! The loop is deliberately synchronous.  The only place it waits is inside
//! [`ByteSource::read_byte`], which returns `Ok(None)` after its timeout so
//! the shutdown flag is checked at least once per timeout period.

use std::sync::atomic::{AtomicBool, Ordering};

use elo_core::DecoderStats;
use thiserror::Error;
use tracing::{debug, info};

use crate::application::forward_touch::{ForwardTouchUseCase, SinkError};
use crate::infrastructure::serial::{ByteSource, TransportError};

/// Errors that end a driver run.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The byte source failed (port unplugged, permission lost, ...).
    #[error("serial transport failed: {0}")]
    Transport(#[from] TransportError),
    /// The sink rejected an event.
    #[error("touch sink failed: {0}")]
    Sink(#[from] SinkError),
}

/// Outcome of a run that was stopped through the shutdown flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Bytes received from the source (timeouts excluded).
    pub bytes_read: u64,
    /// Decoder counters at the time the loop stopped.
    pub stats: DecoderStats,
}

/// Reads bytes until `running` is cleared or an error occurs.
///
/// # Errors
///
/// Returns [`DriverError::Transport`] when the source fails and
/// [`DriverError::Sink`] when the sink rejects an event.  Decoder-level
/// problems (noise, bad checksums) are logged and never end the run.
pub fn run_driver<S>(
    source: &mut S,
    use_case: &mut ForwardTouchUseCase,
    running: &AtomicBool,
) -> Result<RunSummary, DriverError>
where
    S: ByteSource + ?Sized,
{
    let mut bytes_read: u64 = 0;

    while running.load(Ordering::Relaxed) {
        let read = source.read_byte()?;
        if read.is_some() {
            bytes_read += 1;
        }
        if use_case.handle_read(read)?.is_some() && use_case.stats().touch_events == 1 {
            info!("first touch event forwarded (events are flowing)");
        }
    }

    let stats = use_case.stats();
    debug!(
        bytes_read,
        frames = stats.frames,
        touch_events = stats.touch_events,
        checksum_failures = stats.checksum_failures,
        "driver loop stopped"
    );
    Ok(RunSummary { bytes_read, stats })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use elo_core::protocol::frame::encode_touch_frame;
    use elo_core::TouchEvent;

    use crate::infrastructure::serial::mock::ScriptedByteSource;
    use crate::infrastructure::touch_sink::mock::RecordingSink;

    fn press() -> TouchEvent {
        TouchEvent { touch: true, x: 100, y: 200, z: 50, status: 0x03 }
    }

    #[test]
    fn test_closed_source_ends_run_with_transport_error() {
        // Arrange
        let sink = Arc::new(RecordingSink::new());
        let mut uc = ForwardTouchUseCase::new(sink.clone(), false);
        let mut source = ScriptedByteSource::new(encode_touch_frame(&press()).to_vec());
        let running = AtomicBool::new(true);

        // Act
        let result = run_driver(&mut source, &mut uc, &running);

        // Assert
        assert!(matches!(result, Err(DriverError::Transport(TransportError::Closed))));
        assert_eq!(sink.events(), vec![press()]);
    }

    #[test]
    fn test_cleared_flag_stops_before_reading() {
        let sink = Arc::new(RecordingSink::new());
        let mut uc = ForwardTouchUseCase::new(sink.clone(), false);
        let mut source = ScriptedByteSource::new(vec![0x55u8]);
        let running = AtomicBool::new(false);

        let summary = run_driver(&mut source, &mut uc, &running).unwrap();

        assert_eq!(summary.bytes_read, 0);
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_stop_flag_is_honoured_between_reads() {
        // Arrange: the source clears the flag once its script is exhausted.
        let running = Arc::new(AtomicBool::new(true));
        let sink = Arc::new(RecordingSink::new());
        let mut uc = ForwardTouchUseCase::new(sink.clone(), false);
        let mut source = ScriptedByteSource::new(encode_touch_frame(&press()).to_vec())
            .with_timeouts_every(3)
            .stop_when_done(Arc::clone(&running));

        // Act
        let summary = run_driver(&mut source, &mut uc, &running).unwrap();

        // Assert
        assert_eq!(summary.bytes_read, 10);
        assert_eq!(summary.stats.touch_events, 1);
        assert_eq!(sink.events(), vec![press()]);
    }

    #[test]
    fn test_sink_failure_ends_run() {
        let sink = Arc::new(RecordingSink::failing());
        let mut uc = ForwardTouchUseCase::new(sink, false);
        let mut source = ScriptedByteSource::new(encode_touch_frame(&press()).to_vec());
        let running = AtomicBool::new(true);

        let result = run_driver(&mut source, &mut uc, &running);

        assert!(matches!(result, Err(DriverError::Sink(_))));
    }
}
