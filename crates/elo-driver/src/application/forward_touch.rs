//! ForwardTouchUseCase: turns raw serial bytes into touch events for a sink.
//!
//! This use case sits at the application layer.  It owns the
//! [`FrameDecoder`] for one serial stream and delegates delivery of decoded
//! events to a [`TouchSink`] trait object.  The concrete sinks (uinput
//! virtual device, logger, recorder) live in the infrastructure layer.

use std::sync::Arc;

use elo_core::{DecoderStats, FrameDecoder, TouchEvent};
use thiserror::Error;

/// Error type for touch sink operations.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("input device error: {0}")]
    Device(String),
    #[error("input device I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for decoded touch events.
///
/// Each event carries the absolute X/Y position (0..=4095), the pressure
/// reading and the contact flag.  Frames that decode to nothing (foreign
/// packet types, suppressed repeats, corrupted data) never reach the sink.
#[cfg_attr(test, mockall::automock)]
pub trait TouchSink: Send + Sync {
    /// Delivers one touch event.
    fn emit(&self, event: &TouchEvent) -> Result<(), SinkError>;
}

/// The Forward Touch use case.
///
/// Receives bytes one at a time and forwards every event the decoder yields.
pub struct ForwardTouchUseCase {
    decoder: FrameDecoder,
    sink: Arc<dyn TouchSink>,
}

impl ForwardTouchUseCase {
    /// Creates a new use case with a fresh decoder.
    ///
    /// `click_only` enables edge triggering: only contact changes are forwarded.
    pub fn new(sink: Arc<dyn TouchSink>, click_only: bool) -> Self {
        Self {
            decoder: FrameDecoder::new(click_only),
            sink,
        }
    }

    /// Feeds one byte and forwards the resulting event, if any.
    ///
    /// Returns the event that was forwarded.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the sink rejects the event.  The decoder has
    /// already consumed the byte at that point.
    pub fn handle_byte(&mut self, byte: u8) -> Result<Option<TouchEvent>, SinkError> {
        match self.decoder.process(byte) {
            Some(event) => {
                self.sink.emit(&event)?;
                Ok(Some(event))
            }
            None => Ok(None),
        }
    }

    /// Handles the result of one timed read; `None` (timeout) is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the sink rejects the event.
    pub fn handle_read(&mut self, read: Option<u8>) -> Result<Option<TouchEvent>, SinkError> {
        match read {
            Some(byte) => self.handle_byte(byte),
            None => Ok(None),
        }
    }

    /// Returns the decoder counters.
    pub fn stats(&self) -> DecoderStats {
        self.decoder.stats()
    }

    /// Returns `true` while the decoder holds a partial frame.
    pub fn is_collecting(&self) -> bool {
        self.decoder.is_collecting()
    }

    /// Resets the decoder (e.g., after reopening the port).
    pub fn reset(&mut self) {
        self.decoder.reset();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
