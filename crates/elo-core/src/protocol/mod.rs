//! Protocol module containing the wire types and the frame decoder.

pub mod decoder;
pub mod frame;

pub use decoder::{DecoderStats, Events, FrameDecoder, FrameError};
pub use frame::{checksum, encode_touch_frame, Packet, TouchEvent};
