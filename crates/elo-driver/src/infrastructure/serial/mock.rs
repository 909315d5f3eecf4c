//! Scripted byte source for unit and integration tests.
//!
//! Replays a fixed byte sequence and then either reports
//! [`TransportError::Closed`] (like an unplugged adapter) or clears a
//! shutdown flag (like Ctrl-C), so both ways a run can end are testable.
//!
//! # Usage in tests
//!
//! ```ignore
//! let running = Arc::new(AtomicBool::new(true));
//! let mut source = ScriptedByteSource::new(frame.to_vec())
//!     .with_timeouts_every(3)
//!     .stop_when_done(Arc::clone(&running));
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{ByteSource, TransportError};

/// A byte source that replays a script without touching any device.
#[derive(Debug, Default)]
pub struct ScriptedByteSource {
    bytes: VecDeque<u8>,
    /// Report a timeout after this many bytes; `0` disables timeouts.
    timeout_every: usize,
    since_timeout: usize,
    /// Number of timeouts reported so far.
    timeouts: usize,
    stop_flag: Option<Arc<AtomicBool>>,
}

impl ScriptedByteSource {
    /// Creates a source that yields `bytes` and then reports `Closed`.
    pub fn new(bytes: impl Into<VecDeque<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            ..Self::default()
        }
    }

    /// Inserts a timeout (`Ok(None)`) after every `n` bytes.
    pub fn with_timeouts_every(mut self, n: usize) -> Self {
        self.timeout_every = n;
        self
    }

    /// Clears `flag` and reports a timeout once the script is exhausted,
    /// instead of reporting `Closed`.
    pub fn stop_when_done(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    /// Number of bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }

    /// Number of timeouts reported so far.
    pub fn timeouts(&self) -> usize {
        self.timeouts
    }
}

impl ByteSource for ScriptedByteSource {
    fn read_byte(&mut self) -> Result<Option<u8>, TransportError> {
        if self.timeout_every > 0 && self.since_timeout == self.timeout_every {
            self.since_timeout = 0;
            self.timeouts += 1;
            return Ok(None);
        }

        match self.bytes.pop_front() {
            Some(byte) => {
                self.since_timeout += 1;
                Ok(Some(byte))
            }
            None => match &self.stop_flag {
                Some(flag) => {
                    flag.store(false, Ordering::Relaxed);
                    Ok(None)
                }
                None => Err(TransportError::Closed),
            },
        }
    }
}
