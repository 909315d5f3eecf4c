//! Sniff-mode sink: logs every decoded touch event and forwards nothing.
//!
//! Useful for checking wiring, baud rate and calibration without creating a
//! virtual input device (and without the permissions that requires).

use std::sync::atomic::{AtomicU64, Ordering};

use elo_core::TouchEvent;
use tracing::info;

use crate::application::forward_touch::{SinkError, TouchSink};

/// A sink that writes each event to the log at `info` level.
#[derive(Debug, Default)]
pub struct LoggingSink {
    count: AtomicU64,
}

impl LoggingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events logged so far.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

impl TouchSink for LoggingSink {
    fn emit(&self, event: &TouchEvent) -> Result<(), SinkError> {
        self.count.fetch_add(1, Ordering::Relaxed);
        info!(
            status = %format!("0x{:02x}", event.status),
            touch = event.touch,
            abs_x = event.x,
            abs_y = event.y,
            abs_z = event.z,
            "got touch packet"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_sink_never_fails_and_counts() {
        let sink = LoggingSink::new();
        let event = TouchEvent { touch: true, x: 1, y: 2, z: 3, status: 0x03 };

        sink.emit(&event).unwrap();
        sink.emit(&event).unwrap();

        assert_eq!(sink.count(), 2);
    }
}
