//! Byte-at-a-time frame decoder for the 10-byte touch protocol.
//!
//! # How the state machine works (for beginners)
//!
//! Serial data arrives one byte at a time with no out-of-band framing, so
//! the decoder has to find frame boundaries on its own.  It keeps at most
//! one partially received frame:
//!
//! ```text
//!            non-lead byte                      bytes 2..=9
//!          ┌──────────────┐                ┌───────────────┐
//!          ▼              │   lead byte    ▼               │
//!      ┌──────┐ ──────────┘ ─────────────► ┌────────────┐ ─┘
//!      │ Idle │                            │ Collecting │
//!      └──────┘ ◄───────────────────────── └────────────┘
//!                 10th byte (checksum ok or not)
//! ```
//!
//! A byte seen while idle that is not the lead byte is dropped and reported
//! as [`FrameError::Unsynchronized`].  Once ten bytes have been collected the
//! last one is compared against the running checksum; on mismatch the frame
//! is dropped and [`FrameError::ChecksumMismatch`] is reported.  Either way
//! the decoder returns to idle and resynchronises on the next lead byte, so
//! a corrupted frame never poisons the ones after it.
//!
//! # Edge triggering
//!
//! With `edge_triggered` set, [`FrameDecoder::process`] only yields a touch
//! event when the contact flag differs from the last one it yielded.  This is
//! the "click only" mode of the driver.

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::protocol::frame::{accumulate, Packet, TouchEvent, CHECKSUM_SEED, FRAME_LEN, LEAD_BYTE};

/// Recoverable conditions reported while decoding.
///
/// Neither variant leaves the decoder in a bad state: the offending input is
/// discarded and decoding continues with the next byte.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// A byte arrived while no frame was in progress and it was not the lead byte.
    #[error("unsynchronized data: 0x{byte:02X}")]
    Unsynchronized { byte: u8 },

    /// The transmitted checksum does not match the accumulated one.
    #[error("bad checksum: 0x{received:02X}, expected 0x{expected:02X}")]
    ChecksumMismatch { expected: u8, received: u8 },
}

/// Running counters kept by one decoder instance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecoderStats {
    /// Frames that passed checksum validation (any packet type).
    pub frames: u64,
    /// Touch events handed out by [`FrameDecoder::process`].
    pub touch_events: u64,
    /// Touch frames held back because the contact flag did not change.
    pub suppressed: u64,
    /// Valid frames with a packet type other than touch.
    pub unknown_packets: u64,
    /// Bytes dropped while searching for a lead byte.
    pub unsynchronized_bytes: u64,
    /// Frames dropped because of a checksum mismatch.
    pub checksum_failures: u64,
}

/// Decoder for one serial byte stream.
///
/// Owns its partial frame, checksum accumulator and last emitted contact
/// state.  Use one instance per stream.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    buf: [u8; FRAME_LEN],
    /// Number of bytes collected so far; `0` means idle.
    len: usize,
    sum: u8,
    edge_triggered: bool,
    last_touch: Option<bool>,
    stats: DecoderStats,
}

impl Default for FrameDecoder {
    /// A level-triggered decoder: every valid touch frame yields an event.
    fn default() -> Self {
        Self::new(false)
    }
}

impl FrameDecoder {
    /// Creates an idle decoder.
    ///
    /// With `edge_triggered` set, [`process`](Self::process) only yields an
    /// event when the contact flag changes.
    pub fn new(edge_triggered: bool) -> Self {
        Self {
            buf: [0; FRAME_LEN],
            len: 0,
            sum: CHECKSUM_SEED,
            edge_triggered,
            last_touch: None,
            stats: DecoderStats::default(),
        }
    }

    /// Returns `true` if edge triggering is enabled.
    pub fn edge_triggered(&self) -> bool {
        self.edge_triggered
    }

    /// Returns `true` while a frame is partially collected.
    pub fn is_collecting(&self) -> bool {
        self.len != 0
    }

    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Drops any partial frame and forgets the last emitted contact state.
    pub fn reset(&mut self) {
        self.len = 0;
        self.sum = CHECKSUM_SEED;
        self.last_touch = None;
        self.stats = DecoderStats::default();
    }

    /// Advances the state machine by one byte.
    ///
    /// Returns `Ok(Some(packet))` when this byte completes a checksum-valid
    /// frame and `Ok(None)` while more bytes are needed.  Edge triggering is
    /// not applied at this level.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError`] when the byte is discarded or completes a frame
    /// with a bad checksum.  The decoder is idle afterwards in both cases.
    pub fn push(&mut self, byte: u8) -> Result<Option<Packet>, FrameError> {
        if self.len == 0 {
            if byte != LEAD_BYTE {
                self.stats.unsynchronized_bytes += 1;
                return Err(FrameError::Unsynchronized { byte });
            }
            trace!("got lead byte");
            self.sum = CHECKSUM_SEED;
        }

        self.buf[self.len] = byte;
        self.len += 1;

        if self.len < FRAME_LEN {
            self.sum = accumulate(self.sum, byte);
            return Ok(None);
        }

        // Frame complete: the decoder is idle again whatever the outcome.
        self.len = 0;

        if byte != self.sum {
            self.stats.checksum_failures += 1;
            return Err(FrameError::ChecksumMismatch {
                expected: self.sum,
                received: byte,
            });
        }

        self.stats.frames += 1;
        let packet = Packet::from_frame(&self.buf);
        if let Packet::Unknown { .. } = packet {
            self.stats.unknown_packets += 1;
        }
        Ok(Some(packet))
    }

    /// Feeds one byte and returns the touch event to deliver, if any.
    ///
    /// Diagnostics for discarded input are logged at `warn` level; unknown
    /// packet types are consumed silently.
    pub fn process(&mut self, byte: u8) -> Option<TouchEvent> {
        match self.push(byte) {
            Ok(None) => None,
            Ok(Some(Packet::Touch(event))) => self.filter(event),
            Ok(Some(Packet::Unknown { packet_type, .. })) => {
                trace!(packet_type, "ignoring packet of unsupported type");
                None
            }
            Err(FrameError::Unsynchronized { byte }) => {
                warn!(byte, "got unsynchronized data");
                None
            }
            Err(FrameError::ChecksumMismatch { expected, received }) => {
                warn!(expected, received, "bad checksum");
                None
            }
        }
    }

    /// Lazily decodes `bytes` into the touch events [`process`](Self::process)
    /// would yield one byte at a time.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use elo_core::protocol::{encode_touch_frame, FrameDecoder, TouchEvent};
    ///
    /// let event = TouchEvent { touch: true, x: 10, y: 20, z: 30, status: 0x03 };
    /// let mut decoder = FrameDecoder::default();
    /// let decoded: Vec<_> = decoder.events(encode_touch_frame(&event)).collect();
    /// assert_eq!(decoded, vec![event]);
    /// ```
    pub fn events<I>(&mut self, bytes: I) -> Events<'_, I::IntoIter>
    where
        I: IntoIterator<Item = u8>,
    {
        Events {
            decoder: self,
            bytes: bytes.into_iter(),
        }
    }

    fn filter(&mut self, event: TouchEvent) -> Option<TouchEvent> {
        if self.edge_triggered && self.last_touch == Some(event.touch) {
            self.stats.suppressed += 1;
            return None;
        }
        debug!(
            status = event.status,
            touch = event.touch,
            x = event.x,
            y = event.y,
            z = event.z,
            "got touch packet"
        );
        self.last_touch = Some(event.touch);
        self.stats.touch_events += 1;
        Some(event)
    }
}

/// Iterator returned by [`FrameDecoder::events`].
pub struct Events<'a, I> {
    decoder: &'a mut FrameDecoder,
    bytes: I,
}

impl<I: Iterator<Item = u8>> Iterator for Events<'_, I> {
    type Item = TouchEvent;

    fn next(&mut self) -> Option<TouchEvent> {
        for byte in self.bytes.by_ref() {
            if let Some(event) = self.decoder.process(byte) {
                return Some(event);
            }
        }
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
