//! Infrastructure layer for the driver.
//!
//! Contains OS-facing adapters: the serial port, the touch sinks, logging
//! setup and configuration loading.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `elo_core`, but MUST NOT be imported by `elo_core`.
//!
//! # Sub-modules
//!
//! - **`serial`** – the `ByteSource` trait and the `serialport`-backed
//!   implementation (8N1, RTS/CTS, 1 s read timeout).
//!
//! - **`touch_sink`** – `TouchSink` implementations: the uinput virtual
//!   touchscreen on Linux, a logging sink for sniff mode and a recording
//!   mock for tests.
//!
//! - **`logging`** – `tracing-subscriber` setup driven by `-v`, `--logfile`
//!   and `--stdout`.
//!
//! - **`storage`** – TOML configuration file parsing and CLI merging.

pub mod logging;
pub mod serial;
pub mod storage;
pub mod touch_sink;
