//! Mock touch sink for unit and integration testing.
//!
//! # Why a mock sink?
//!
//! The uinput sink creates a real input device that:
//!
//! - Requires write access to `/dev/uinput`.
//! - Actually moves the pointer on the test machine.
//! - Cannot be observed directly from Rust test code.
//!
//! The `RecordingSink` replaces the device with in-memory recording.  Each
//! event is pushed into a `Mutex<Vec<...>>` so test assertions can inspect
//! exactly what was forwarded and in what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let sink = Arc::new(RecordingSink::new());
//! let mut use_case = ForwardTouchUseCase::new(sink.clone(), false);
//!
//! for byte in frame {
//!     use_case.handle_byte(byte).unwrap();
//! }
//!
//! assert_eq!(sink.events().len(), 1);
//! ```
//!
//! # `should_fail` flag
//!
//! Build the sink with [`RecordingSink::failing`] to make every `emit`
//! return `SinkError::Device`, for testing error paths without a broken
//! device.

use std::sync::Mutex;

use elo_core::TouchEvent;

use crate::application::forward_touch::{SinkError, TouchSink};

/// A sink that records all events without touching any device.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Every event passed to `emit`, in order.
    pub emitted: Mutex<Vec<TouchEvent>>,
    /// When `true`, every call returns `SinkError::Device` and records nothing.
    pub should_fail: bool,
}

impl RecordingSink {
    /// Creates an empty sink with `should_fail = false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink whose every `emit` fails.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Returns a copy of the recorded events.
    pub fn events(&self) -> Vec<TouchEvent> {
        self.emitted.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl TouchSink for RecordingSink {
    /// Records the event, or returns an error if `should_fail` is set.
    fn emit(&self, event: &TouchEvent) -> Result<(), SinkError> {
        if self.should_fail {
            return Err(SinkError::Device("mock failure".into()));
        }
        self.emitted
            .lock()
            .map_err(|_| SinkError::Device("recording mutex poisoned".into()))?
            .push(*event);
        Ok(())
    }
}
