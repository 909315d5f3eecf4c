//! Touch sink implementations.
//!
//! - **`logging`** – sniff mode: decoded events are written to the log only.
//! - **`linux`** – uinput virtual touchscreen, selected at compile time via
//!   `#[cfg(target_os = "linux")]`.
//! - **`mock`** – records events in memory for tests.

pub mod logging;
pub mod mock;

#[cfg(target_os = "linux")]
pub mod linux;

pub use logging::LoggingSink;
