//! # elo-core
//!
//! Shared library for the Elo serial touch driver containing the wire types
//! of the 10-byte touch protocol and the byte-at-a-time frame decoder.
//!
//! It has zero dependencies on serial ports, input devices, or OS APIs, so
//! it can be driven from any byte source and tested with plain byte slices.
//!
//! # Architecture overview (for beginners)
//!
//! Elo touch controllers of the E271-2210 family report touches over a
//! serial line as fixed 10-byte frames: a lead byte, a packet type, a status
//! byte, three little-endian 16-bit values (X, Y and pressure) and a
//! checksum.  The driver reads the port one byte at a time and hands every
//! byte to a [`FrameDecoder`], which finds the frame boundaries, validates
//! the checksum and yields a [`TouchEvent`] whenever a touch report is
//! complete.
//!
//! - **`protocol::frame`** – Constants, [`TouchEvent`], [`Packet`] and the
//!   checksum helpers.
//! - **`protocol::decoder`** – The [`FrameDecoder`] state machine and its
//!   recoverable [`FrameError`]s.

pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `elo_core::FrameDecoder` instead of `elo_core::protocol::decoder::FrameDecoder`.
pub use protocol::decoder::{DecoderStats, FrameDecoder, FrameError};
pub use protocol::frame::{Packet, TouchEvent};
