//! elo-driver library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the driver do? (for beginners)
//!
//! Older Elo touchscreens talk to the host over an RS-232 line instead of
//! USB.  The controller sends a 10-byte packet for every touch sample; the
//! kernel has no driver attached to a plain serial port, so nothing on the
//! desktop reacts to touches.
//!
//! This driver:
//!
//! 1. Opens the serial port (default 9600 baud, RTS/CTS flow control).
//! 2. Reads it one byte at a time and feeds each byte to the `elo_core`
//!    frame decoder, which validates checksums and resynchronises on noise.
//! 3. Forwards every decoded touch report to a `TouchSink`: normally a
//!    uinput virtual touchscreen, or just the log in `--sniff` mode.

/// Application layer: use cases for the driver.
pub mod application;

/// Infrastructure layer: serial port, touch sinks, logging and config.
pub mod infrastructure;
