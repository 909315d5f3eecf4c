//! Wire types for the Elo 10-byte "SmartSet" touch packet.
//!
//! Frame layout:
//! ```text
//! [lead:1 = 0x55][type:1][status:1][x:2][y:2][z:2][checksum:1]
//! ```
//! Total frame size: 10 bytes. Multi-byte fields are little-endian.
//!
//! # Checksum (for beginners)
//!
//! The controller appends one byte that lets the receiver detect corrupted
//! frames.  It is computed by starting from the seed `0xAA` and adding every
//! preceding byte of the frame (lead byte included), keeping only the low
//! 8 bits of the running sum.  If a single byte flips in transit, the sum
//! no longer matches and the frame is thrown away.

// ── Protocol constants ────────────────────────────────────────────────────────

/// Total size of one frame in bytes, checksum included.
pub const FRAME_LEN: usize = 10;

/// Marker byte that starts every frame (`'U'`).
pub const LEAD_BYTE: u8 = 0x55;

/// Packet type discriminator for touch reports (`'T'`).
pub const TOUCH_PACKET: u8 = 0x54;

/// Status bits that signal finger contact.
pub const TOUCH_STATUS_MASK: u8 = 0x03;

/// Initial value of the checksum accumulator.
pub const CHECKSUM_SEED: u8 = 0xAA;

/// Offset of the packet type byte.
pub const TYPE_OFFSET: usize = 1;

/// Offset of the status byte.
pub const STATUS_OFFSET: usize = 2;

/// Offset of the transmitted checksum byte.
pub const CHECKSUM_OFFSET: usize = FRAME_LEN - 1;

/// Largest coordinate the controller reports on either axis.
pub const AXIS_MAX: u16 = 4095;

// ── Packet types ──────────────────────────────────────────────────────────────

/// One decoded touch report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchEvent {
    /// `true` while a finger is in contact with the screen.
    pub touch: bool,
    /// Horizontal position in controller units.
    pub x: u16,
    /// Vertical position in controller units.
    pub y: u16,
    /// Pressure reading in controller units.
    pub z: u16,
    /// Raw status byte as received.
    pub status: u8,
}

impl TouchEvent {
    /// Decodes the body of a checksum-valid touch frame.
    ///
    /// The caller guarantees `frame[TYPE_OFFSET] == TOUCH_PACKET`.
    fn from_frame(frame: &[u8; FRAME_LEN]) -> Self {
        let status = frame[STATUS_OFFSET];
        Self {
            touch: status & TOUCH_STATUS_MASK != 0,
            x: u16::from_le_bytes([frame[3], frame[4]]),
            y: u16::from_le_bytes([frame[5], frame[6]]),
            z: u16::from_le_bytes([frame[7], frame[8]]),
            status,
        }
    }
}

/// The typed content of one checksum-valid frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packet {
    /// A touch report (`type == 0x54`).
    Touch(TouchEvent),
    /// Any other packet type.  Carried through so callers can trace it, but
    /// the driver never forwards it.
    Unknown {
        packet_type: u8,
        /// Bytes 2..=8 of the frame.
        body: [u8; 7],
    },
}

impl Packet {
    /// Interprets a complete frame whose checksum has already been verified.
    pub fn from_frame(frame: &[u8; FRAME_LEN]) -> Self {
        match frame[TYPE_OFFSET] {
            TOUCH_PACKET => Packet::Touch(TouchEvent::from_frame(frame)),
            packet_type => {
                let mut body = [0u8; 7];
                body.copy_from_slice(&frame[STATUS_OFFSET..CHECKSUM_OFFSET]);
                Packet::Unknown { packet_type, body }
            }
        }
    }

    /// Returns the packet type byte.
    pub fn packet_type(&self) -> u8 {
        match self {
            Packet::Touch(_) => TOUCH_PACKET,
            Packet::Unknown { packet_type, .. } => *packet_type,
        }
    }
}

// ── Checksum helpers ──────────────────────────────────────────────────────────

/// Adds one byte to a running checksum, wrapping at 256.
#[inline]
pub fn accumulate(sum: u8, byte: u8) -> u8 {
    sum.wrapping_add(byte)
}

/// Computes the checksum over `bytes` starting from [`CHECKSUM_SEED`].
///
/// Pass the first nine bytes of a frame to get the value its tenth byte
/// must carry.
///
/// # Examples
///
/// ```rust
/// use elo_core::protocol::frame::checksum;
///
/// assert_eq!(checksum(&[]), 0xAA);
/// assert_eq!(checksum(&[0x55, 0x01]), 0x00);
/// ```
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(CHECKSUM_SEED, |sum, &b| accumulate(sum, b))
}

/// Builds the wire representation of a touch report, checksum included.
///
/// Useful for replay tooling, tests and benchmarks.
///
/// # Examples
///
/// ```rust
/// use elo_core::protocol::frame::{encode_touch_frame, TouchEvent, LEAD_BYTE};
///
/// let event = TouchEvent { touch: true, x: 1, y: 2, z: 3, status: 0x03 };
/// let frame = encode_touch_frame(&event);
/// assert_eq!(frame[0], LEAD_BYTE);
/// ```
pub fn encode_touch_frame(event: &TouchEvent) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    frame[0] = LEAD_BYTE;
    frame[TYPE_OFFSET] = TOUCH_PACKET;
    frame[STATUS_OFFSET] = event.status;
    frame[3..5].copy_from_slice(&event.x.to_le_bytes());
    frame[5..7].copy_from_slice(&event.y.to_le_bytes());
    frame[7..9].copy_from_slice(&event.z.to_le_bytes());
    frame[CHECKSUM_OFFSET] = checksum(&frame[..CHECKSUM_OFFSET]);
    frame
}

// ── Tests ─────────────────────────────────────────────────────────────────────
